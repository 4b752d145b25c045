//! Dynamic table row

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// One record displayed by the table.
///
/// Rows hold field values as a `HashMap<String, Value>`, so any leaf column
/// can read any field by its identifier.
///
/// # Example
///
/// ```
/// use grouped_table::model::Row;
///
/// let row = Row::new()
///     .set("id", 7)
///     .set("street", "Baker Street");
///
/// assert_eq!(row.text("street"), "Baker Street");
/// assert_eq!(row.text("missing"), "");
/// assert_eq!(row.key("id").as_deref(), Some("7"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: HashMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Display text of a field. Missing fields render as an empty string.
    pub fn text(&self, field: &str) -> String {
        self.get(field).map(Value::to_string).unwrap_or_default()
    }

    /// Selection identifier of this row, read from `selector`.
    ///
    /// Returns `None` when the field is absent or null; such rows cannot be
    /// selected.
    pub fn key(&self, selector: &str) -> Option<String> {
        match self.get(selector) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.to_string()),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_json_object() {
        let row: Row = serde_json::from_str(r#"{"id": 1, "street": "Main", "door": null}"#)
            .expect("valid row");
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
        assert_eq!(row.text("street"), "Main");
        assert!(row.contains("door"));
    }

    #[test]
    fn test_key_absent_or_null() {
        let row = Row::new().set("id", Value::Null).set("name", "x");
        assert_eq!(row.key("id"), None);
        assert_eq!(row.key("uuid"), None);
        assert_eq!(row.key("name").as_deref(), Some("x"));
    }
}
