//! Leaf-element strategies for text, integer, datetime and choice fields.
//!
//! A scalar is one element holding its text form. The element has no text
//! payload at all when the value is absent.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use schemaxml_schema::{Field, Value, format_datetime};

use crate::error::{CodecError, Result, StructuralError};
use crate::strategy::{FieldDecoder, FieldEncoder, kind_mismatch};
use crate::walker::{SchemaWalker, XmlTreeWalker};
use crate::xml::Element;

/// Alternative datetime layouts accepted after RFC 3339.
const DATETIME_FALLBACK_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// Text conversion for one scalar kind.
pub(crate) trait ScalarCodec {
    fn field(&self) -> &Field;

    /// Text form of a present value. `value` is never `Absent`.
    fn render(&self, value: &Value) -> Result<String>;

    /// Reads a value from the element's text.
    fn parse(&self, raw: &str) -> Result<Value>;

    /// Text that stands for an absent value in addition to no text at all.
    fn is_absent_text(&self, _raw: &str) -> bool {
        false
    }

    fn parse_error(&self, raw: &str, reason: impl ToString) -> CodecError {
        CodecError::Parse {
            field: self.field().name().to_string(),
            kind: self.field().kind(),
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub(crate) struct TextCodec<'a> {
    pub(crate) field: &'a Field,
}

impl ScalarCodec for TextCodec<'_> {
    fn field(&self) -> &Field {
        self.field
    }

    fn render(&self, value: &Value) -> Result<String> {
        match value {
            Value::Text(text) => Ok(text.clone()),
            other => Err(kind_mismatch(self.field, other).into()),
        }
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        Ok(Value::Text(raw.to_string()))
    }
}

pub(crate) struct IntegerCodec<'a> {
    pub(crate) field: &'a Field,
}

impl ScalarCodec for IntegerCodec<'_> {
    fn field(&self) -> &Field {
        self.field
    }

    fn render(&self, value: &Value) -> Result<String> {
        match value {
            Value::Integer(n) => Ok(n.to_string()),
            other => Err(kind_mismatch(self.field, other).into()),
        }
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        raw.trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| self.parse_error(raw, e))
    }

    fn is_absent_text(&self, raw: &str) -> bool {
        raw.is_empty()
    }
}

pub(crate) struct DatetimeCodec<'a> {
    pub(crate) field: &'a Field,
}

impl ScalarCodec for DatetimeCodec<'_> {
    fn field(&self) -> &Field {
        self.field
    }

    fn render(&self, value: &Value) -> Result<String> {
        match value {
            Value::Datetime(dt) => Ok(format_datetime(dt)),
            other => Err(kind_mismatch(self.field, other).into()),
        }
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        let text = raw.trim();
        match DateTime::parse_from_rfc3339(text) {
            Ok(dt) => Ok(Value::Datetime(dt)),
            Err(rfc3339_error) => DATETIME_FALLBACK_FORMATS
                .iter()
                .find_map(|format| DateTime::<FixedOffset>::parse_from_str(text, format).ok())
                .or_else(|| parse_offset_with_seconds(text))
                .map(Value::Datetime)
                .ok_or_else(|| self.parse_error(raw, rfc3339_error)),
        }
    }
}

/// Reads `YYYY-MM-DDTHH:MM:SS[.f]±HH:MM:SS`, the form written for offsets
/// that are not a whole number of minutes.
fn parse_offset_with_seconds(text: &str) -> Option<DateTime<FixedOffset>> {
    let split = text.len().checked_sub(9)?;
    let (local, offset) = (text.get(..split)?, text.get(split..)?);

    let sign = match offset.as_bytes() {
        [b'+', .., b':', _, _] => 1,
        [b'-', .., b':', _, _] => -1,
        _ => return None,
    };
    let mut parts = offset[1..].split(':');
    let mut component = || {
        parts
            .next()
            .filter(|p| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|p| p.parse::<i32>().ok())
    };
    let (hours, minutes, seconds) = (component()?, component()?, component()?);
    if minutes > 59 || seconds > 59 {
        return None;
    }

    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60 + seconds))?;
    let naive = NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    offset.from_local_datetime(&naive).single()
}

pub(crate) struct ChoiceCodec<'a> {
    pub(crate) field: &'a Field,
}

impl ScalarCodec for ChoiceCodec<'_> {
    fn field(&self) -> &Field {
        self.field
    }

    fn render(&self, value: &Value) -> Result<String> {
        match value {
            Value::Choice(s) | Value::Text(s) => Ok(s.clone()),
            other => Err(kind_mismatch(self.field, other).into()),
        }
    }

    // Membership is left to validation.
    fn parse(&self, raw: &str) -> Result<Value> {
        Ok(Value::Choice(raw.to_string()))
    }
}

/// Rejects a scalar element that has child elements.
fn ensure_leaf(field: &Field, element: &Element) -> Result<()> {
    if element.has_children() {
        return Err(StructuralError::UnexpectedChildren {
            field: field.name().to_string(),
            kind: field.kind(),
            element: element.name().to_string(),
        }
        .into());
    }
    Ok(())
}

fn encode_scalar<C: ScalarCodec>(codec: &C, container: &mut Element, value: &Value) -> Result<()> {
    let text = match value {
        Value::Absent => None,
        present => Some(codec.render(present)?),
    };
    let element = container.sub_element(codec.field().name());
    if let Some(text) = text {
        element.set_text(text);
    }
    Ok(())
}

fn decode_scalar<C: ScalarCodec>(codec: &C, element: &Element) -> Result<Value> {
    ensure_leaf(codec.field(), element)?;
    match element.text() {
        None => Ok(Value::Absent),
        Some(raw) if codec.is_absent_text(raw) => Ok(Value::Absent),
        Some(raw) => codec.parse(raw),
    }
}

macro_rules! scalar_field_codec {
    ($($codec:ident),+ $(,)?) => {
        $(
            impl FieldEncoder for $codec<'_> {
                fn encode(
                    &self,
                    _walker: &SchemaWalker<'_>,
                    container: &mut Element,
                    value: &Value,
                    _depth: usize,
                ) -> Result<()> {
                    encode_scalar(self, container, value)
                }
            }

            impl FieldDecoder for $codec<'_> {
                fn decode(
                    &self,
                    _walker: &XmlTreeWalker<'_>,
                    element: &Element,
                    _depth: usize,
                ) -> Result<Value> {
                    decode_scalar(self, element)
                }
            }
        )+
    };
}

scalar_field_codec!(TextCodec, IntegerCodec, DatetimeCodec, ChoiceCodec);
