use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{schema::{DataType, Field}, ExprError, ExprResult};

/// An ordered set of uniquely named fields.
///
/// The `fields` map keeps insertion order, so the schema produced by
/// resolving a projection lists its columns in projection order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Map of field name -> field
    pub fields: IndexMap<String, Field>,
}

impl Schema {
    /// Build a schema from fields, failing if two fields share a name.
    pub fn new(fields: Vec<Field>) -> ExprResult<Schema> {
        let mut map = IndexMap::with_capacity(fields.len());
        for field in fields {
            if map.contains_key(&field.name) {
                return Err(ExprError::DuplicateName(field.name));
            }
            map.insert(field.name.clone(), field);
        }
        Ok(Schema { fields: map })
    }

    pub fn empty() -> Schema {
        Schema::default()
    }

    pub fn from_field_name_and_types<S: Into<String>>(pairs: impl IntoIterator<Item = (S, DataType)>) -> ExprResult<Schema> {
        Schema::new(pairs.into_iter().map(|(name, dtype)| Field::new(name, dtype)).collect())
    }

    /// Look up a field, reporting the available names when it is missing.
    pub fn get_field(&self, name: &str) -> ExprResult<&Field> {
        self.fields.get(name).ok_or_else(|| ExprError::FieldNotFound {
            name: name.to_string(),
            available: self.column_names(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Field;
    type IntoIter = indexmap::map::Values<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema[")?;
        for (i, field) in self.fields.values().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field.name, field.dtype)?;
        }
        write!(f, "]")
    }
}

impl PartialEq for Schema {
    /// Same fields in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.fields.iter().eq(other.fields.iter())
    }
}

impl Eq for Schema {}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Schema {
        Schema::from_field_name_and_types([
            ("id", DataType::Int64),
            ("full_name", DataType::Utf8),
            ("age", DataType::Int32),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_insertion_order() {
        let schema = people();
        assert_eq!(schema.column_names(), vec!["id", "full_name", "age"]);
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.to_string(), "Schema[id: Int64, full_name: Utf8, age: Int32]");
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab = Schema::from_field_name_and_types([("a", DataType::Int64), ("b", DataType::Utf8)]).unwrap();
        let ba = Schema::from_field_name_and_types([("b", DataType::Utf8), ("a", DataType::Int64)]).unwrap();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn rejects_duplicate_fields() {
        let err = Schema::from_field_name_and_types([("a", DataType::Int64), ("a", DataType::Utf8)]).unwrap_err();
        assert_eq!(err, ExprError::DuplicateName("a".into()));
    }

    #[test]
    fn missing_field_lists_candidates() {
        let schema = people();
        match schema.get_field("email") {
            Err(ExprError::FieldNotFound { name, available }) => {
                assert_eq!(name, "email");
                assert_eq!(available, vec!["id", "full_name", "age"]);
            }
            other => panic!("expected FieldNotFound, got {other:?}"),
        }
    }
}
