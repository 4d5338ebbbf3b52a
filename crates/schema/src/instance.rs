//! Accessor/mutator interface the codec uses to read and populate objects.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::InstanceError;
use crate::value::Value;

/// An object whose fields the codec can read and write by name.
///
/// Implement this for concrete types to serialize them directly; use
/// [`Record`](crate::Record) when no concrete type exists. Nested object
/// fields always travel as `Record`s inside [`Value::Object`].
pub trait Instance {
    /// Returns the current value of `field`, or `None` if the instance has no
    /// such field at all. An unset optional field returns `Value::Absent`.
    fn get(&self, field: &str) -> Option<Cow<'_, Value>>;

    /// Stores `value` in `field`.
    fn set(&mut self, field: &str, value: Value) -> Result<(), InstanceError>;

    /// Records that the instance was populated according to `schema`.
    fn mark_conforms(&mut self, schema: &str);

    /// Returns true once [`mark_conforms`](Instance::mark_conforms) was called
    /// with `schema`.
    fn conforms_to(&self, schema: &str) -> bool;
}

/// Set of schema names an instance conforms to.
///
/// Concrete [`Instance`] implementations embed one of these to back
/// `mark_conforms` / `conforms_to`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conformance(BTreeSet<String>);

impl Conformance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, schema: &str) {
        if !self.0.contains(schema) {
            self.0.insert(schema.to_string());
        }
    }

    pub fn contains(&self, schema: &str) -> bool {
        self.0.contains(schema)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Schema names in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conformance_marks_once() {
        let mut conformance = Conformance::new();
        assert!(conformance.is_empty());
        conformance.mark("IPerson");
        conformance.mark("IPerson");
        conformance.mark("IAddress");
        assert!(conformance.contains("IPerson"));
        assert!(!conformance.contains("IOther"));
        assert_eq!(conformance.iter().collect::<Vec<_>>(), vec!["IAddress", "IPerson"]);
    }
}
