//! The closed set of field kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of a schema field.
///
/// The set is closed: every encoder and decoder dispatches on it with an
/// exhaustive `match`, so adding a kind is a compile error until every
/// strategy handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Signed 64-bit integer.
    Integer,
    /// Timezone-aware timestamp.
    Datetime,
    /// One value out of a closed set of strings.
    Choice,
    /// Nested object described by its own schema.
    Object,
    /// Ordered, homogeneous sequence.
    List,
    /// Unordered, homogeneous, de-duplicated collection.
    Set,
}

impl FieldKind {
    /// Every kind, in declaration order.
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Text,
        FieldKind::Integer,
        FieldKind::Datetime,
        FieldKind::Choice,
        FieldKind::Object,
        FieldKind::List,
        FieldKind::Set,
    ];

    /// Lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Datetime => "datetime",
            FieldKind::Choice => "choice",
            FieldKind::Object => "object",
            FieldKind::List => "list",
            FieldKind::Set => "set",
        }
    }

    /// Returns true if elements of this kind hold child elements rather than text.
    pub fn is_composite(&self) -> bool {
        matches!(self, FieldKind::Object | FieldKind::List | FieldKind::Set)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown field kind: {}", s))
    }
}
