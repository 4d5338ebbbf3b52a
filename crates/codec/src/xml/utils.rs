//! Helpers shared by the XML reader and writer.

use std::borrow::Cow;

use quick_xml::escape::{escape, resolve_predefined_entity};

use crate::error::{Result, StructuralError};

/// XML version written in the declaration.
pub const XML_VERSION: &str = "1.0";

/// The only encoding the codec reads and writes.
pub const XML_ENCODING: &str = "UTF-8";

/// Checks whether raw character data consists only of XML whitespace.
pub fn is_whitespace_text(text: &[u8]) -> bool {
    text.iter()
        .all(|b| matches!(b, b' ' | b'\n' | b'\r' | b'\t'))
}

/// Escapes character data for writing. Carriage returns are written as
/// `&#13;` so that readers do not fold them into line feeds.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    let escaped = escape(text);
    if escaped.contains('\r') {
        Cow::Owned(escaped.replace('\r', "&#13;"))
    } else {
        escaped
    }
}

/// Resolves the body of a general reference (`amp`, `#60`, `#x3C`, ...) to
/// the text it stands for.
///
/// Only the five predefined entities and character references are known; a
/// document declaring its own entities is rejected.
pub fn resolve_reference(name: &str) -> Result<String> {
    let unknown = || StructuralError::UnknownEntity(name.to_string());

    if let Some(code) = name.strip_prefix('#') {
        let parsed = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => code.parse::<u32>(),
        };
        return parsed
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .ok_or_else(|| unknown().into());
    }

    resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| unknown().into())
}
