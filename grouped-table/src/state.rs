//! Sort, selection and filter state held by a table instance.
//!
//! The three slices are independent; they only meet when the table renders.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::compare::Order;
use crate::model::{LeafColumn, Row};

// =============================================================================
// SortState
// =============================================================================

/// Current sort key and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<String>,
    pub order: Order,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a sort request for `column`.
    ///
    /// Requesting the current column flips the direction; any other column
    /// becomes the sort key in ascending order.
    pub fn request(&mut self, column: &str) {
        if self.key.as_deref() == Some(column) {
            self.order = self.order.toggle();
        } else {
            self.key = Some(column.to_string());
            self.order = Order::Asc;
        }
    }

    pub fn is_sorted_by(&self, column: &str) -> bool {
        self.key.as_deref() == Some(column)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Selected row keys, in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    keys: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a key. Returns `true` if the key is now selected.
    pub fn toggle(&mut self, key: &str) -> bool {
        match self.keys.iter().position(|k| k == key) {
            Some(index) => {
                self.keys.remove(index);
                false
            }
            None => {
                self.keys.push(key.to_string());
                true
            }
        }
    }

    /// Replace the selection with `keys`, dropping duplicates.
    pub fn select_all<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.keys.clear();
        for key in keys {
            if !self.keys.contains(&key) {
                self.keys.push(key);
            }
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

// =============================================================================
// FilterMap
// =============================================================================

/// Active column filters: leaf id to non-empty filter text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterMap {
    filters: BTreeMap<String, String>,
}

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the new contents of `column`'s filter input.
    ///
    /// Empty text removes the column's entry. Returns `true` if the map
    /// changed.
    pub fn apply_input(&mut self, column: &str, text: &str) -> bool {
        if text.is_empty() {
            return self.filters.remove(column).is_some();
        }
        match self.filters.get_mut(column) {
            Some(existing) if existing == text => false,
            Some(existing) => {
                *existing = text.to_string();
                true
            }
            None => {
                self.filters.insert(column.to_string(), text.to_string());
                true
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.filters.get(column).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Returns `true` if `row` passes every active filter.
    ///
    /// A filter matches when the column's displayed text contains the filter
    /// text, ignoring case. Columns not present in `leaves` are matched
    /// against the raw field text.
    pub fn matches(&self, row: &Row, leaves: &[LeafColumn]) -> bool {
        self.iter().all(|(column, needle)| {
            let text = match leaves.iter().find(|leaf| leaf.id == column) {
                Some(leaf) => leaf.display(row),
                None => row.text(column),
            };
            text.to_lowercase().contains(&needle.to_lowercase())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_request_sequence() {
        let mut sort = SortState::new();
        assert_eq!(sort.key, None);
        assert_eq!(sort.order, Order::Asc);

        sort.request("name");
        assert_eq!(sort.key.as_deref(), Some("name"));
        assert_eq!(sort.order, Order::Asc);

        sort.request("name");
        assert_eq!(sort.order, Order::Desc);

        sort.request("age");
        assert_eq!(sort.key.as_deref(), Some("age"));
        assert_eq!(sort.order, Order::Asc);
    }

    #[test]
    fn test_selection_preserves_order() {
        let mut selection = Selection::new();
        assert!(selection.toggle("3"));
        assert!(selection.toggle("1"));
        assert!(selection.toggle("2"));
        assert!(!selection.toggle("1"));
        assert_eq!(selection.keys(), ["3", "2"]);
    }

    #[test]
    fn test_select_all_dedups() {
        let mut selection = Selection::new();
        selection.select_all(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(selection.keys(), ["a", "b"]);
    }

    #[test]
    fn test_cleared_filter_is_removed() {
        let mut filters = FilterMap::new();
        assert!(filters.apply_input("street", "Ba"));
        assert_eq!(filters.get("street"), Some("Ba"));

        assert!(filters.apply_input("street", ""));
        assert_eq!(filters.get("street"), None);
        assert!(filters.is_empty());

        assert!(!filters.apply_input("street", ""));
    }

    #[test]
    fn test_filter_matches_display_text() {
        let leaves = vec![LeafColumn::new("door", "Door").format(|row| format!("No. {}", row.text("door")))];
        let row = Row::new().set("door", 12).set("street", "Baker Street");

        let mut filters = FilterMap::new();
        filters.apply_input("street", "baker");
        assert!(filters.matches(&row, &leaves));

        filters.apply_input("door", "no. 1");
        assert!(filters.matches(&row, &leaves));

        filters.apply_input("door", "no. 3");
        assert!(!filters.matches(&row, &leaves));
    }

    #[test]
    fn test_filter_map_serializes_as_object() {
        let mut filters = FilterMap::new();
        filters.apply_input("b", "2");
        filters.apply_input("a", "1");
        let json = serde_json::to_string(&filters).expect("serializable");
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
    }
}
