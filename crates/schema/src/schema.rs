//! Schema descriptions: named, ordered, immutable field lists.

use std::collections::HashMap;

use crate::error::SchemaError;
use crate::field::{Field, FieldDescriptor};

/// An ordered list of uniquely named fields.
///
/// Field order is the element order on encode. Lookup by name is what decode
/// uses, so decoding tolerates any element order. The schema name doubles as
/// the conformance marker stamped on decoded instances.
///
/// Schemas are validated on construction and never mutated afterwards, so a
/// single `Arc<Schema>` can be shared by nested object fields and concurrent
/// codec calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Builds a schema, checking that names are unique valid element names
    /// and that every choice field has at least one allowed value.
    pub fn new(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = Field>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::EmptySchemaName);
        }

        let fields: Vec<Field> = fields.into_iter().collect();
        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            check_field(&name, field)?;
            if index.insert(field.name().to_string(), position).is_some() {
                return Err(SchemaError::DuplicateField {
                    schema: name,
                    field: field.name().to_string(),
                });
            }
        }

        Ok(Self {
            name,
            fields,
            index,
        })
    }

    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks a field up by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.index.get(name).map(|&position| &self.fields[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_required())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Incremental [`Schema`] construction.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        Schema::new(self.name, self.fields)
    }
}

fn check_field(schema: &str, field: &Field) -> Result<(), SchemaError> {
    if !is_valid_element_name(field.name()) {
        return Err(SchemaError::InvalidFieldName {
            schema: schema.to_string(),
            field: field.name().to_string(),
        });
    }

    match field.descriptor() {
        FieldDescriptor::Choice(choice) if choice.values.is_empty() => {
            Err(SchemaError::EmptyChoice {
                field: field.name().to_string(),
            })
        }
        // Item names become item tags, so they obey the same rules.
        FieldDescriptor::List(collection) | FieldDescriptor::Set(collection) => {
            check_field(schema, &collection.value_type)
        }
        _ => Ok(()),
    }
}

/// Returns true if `name` can be used verbatim as an XML element tag.
///
/// Namespace prefixes are not supported, so `:` is rejected.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
