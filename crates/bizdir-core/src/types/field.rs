//! Dynamic column/value maps for partial updates and bulk conditions.
//!
//! Partial updates and bulk-operation conditions are expressed as ordered
//! `column -> value` pairs rather than full entity structs. Column names
//! come from calling code (`&'static str`), never from user input; user
//! input only ever appears as a bound value.

use serde::{Deserialize, Serialize};

/// A dynamic value that can be bound into a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// SQL `NULL`.
    Null,
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(v: Option<V>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

/// An ordered set of `column -> value` pairs.
///
/// Used both as the partial-update payload (`SET col = value, ...`) and as
/// the equality condition of bulk operations (`WHERE col = value AND ...`).
/// Insertion order is preserved so generated SQL is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldMap(Vec<(&'static str, FieldValue)>);

impl FieldMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a column's value. Builder-style.
    pub fn set(mut self, column: &'static str, value: impl Into<FieldValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Add or overwrite a column's value in place.
    pub fn insert(&mut self, column: &'static str, value: impl Into<FieldValue>) {
        let value = value.into();
        if let Some(entry) = self.0.iter_mut().find(|(col, _)| *col == column) {
            entry.1 = value;
        } else {
            self.0.push((column, value));
        }
    }

    /// Iterate over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.0.iter().map(|(col, val)| (*col, val))
    }

    /// Number of columns in the map.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map holds no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_insertion_order() {
        let map = FieldMap::new()
            .set("name", "X")
            .set("is_active", true)
            .set("user_type_id", 2i64);
        let columns: Vec<&str> = map.iter().map(|(col, _)| col).collect();
        assert_eq!(columns, vec!["name", "is_active", "user_type_id"]);
    }

    #[test]
    fn test_insert_overwrites_existing_column() {
        let mut map = FieldMap::new().set("name", "first");
        map.insert("name", "second");
        assert_eq!(map.len(), 1);
        let (_, value) = map.iter().next().unwrap();
        assert_eq!(*value, FieldValue::String("second".to_string()));
    }

    #[test]
    fn test_option_becomes_null() {
        let none: Option<i64> = None;
        assert_eq!(FieldValue::from(none), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(5i64)), FieldValue::Integer(5));
    }
}
