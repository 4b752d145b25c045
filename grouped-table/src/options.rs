//! Table options and configuration loading.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{columns_from_specs, ColumnNode, ColumnSpec, Row};

pub const DEFAULT_CHECKBOX_SELECTOR: &str = "id";
pub const DEFAULT_SKELETON_ROWS: u16 = 3;
pub const DEFAULT_EMPTY_MESSAGE: &str = "No Records to Show";

/// Optional behaviors of a table. Each flag toggles independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Leaf headers become sort targets.
    pub enable_sort: bool,
    /// Draw cell borders.
    pub enable_borders: bool,
    /// Truncate overflowing text with an ellipsis instead of wrapping.
    pub ellipsis: bool,
    /// Maximum body height; the header stays pinned while the body scrolls.
    pub fixed_height: Option<u16>,
    /// Show a filter input under the header.
    pub enable_filters: bool,
    /// Show a checkbox column for row selection.
    pub enable_checkbox: bool,
    /// Row field used as the selection key.
    pub checkbox_selector: String,
    /// Placeholder rows shown while rows are loading.
    pub skeleton_rows: u16,
    /// Message shown when there are no rows.
    pub empty_message: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            enable_sort: false,
            enable_borders: false,
            ellipsis: false,
            fixed_height: None,
            enable_filters: false,
            enable_checkbox: false,
            checkbox_selector: DEFAULT_CHECKBOX_SELECTOR.to_string(),
            skeleton_rows: DEFAULT_SKELETON_ROWS,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(mut self, enabled: bool) -> Self {
        self.enable_sort = enabled;
        self
    }

    pub fn borders(mut self, enabled: bool) -> Self {
        self.enable_borders = enabled;
        self
    }

    pub fn ellipsis(mut self, enabled: bool) -> Self {
        self.ellipsis = enabled;
        self
    }

    pub fn fixed_height(mut self, height: u16) -> Self {
        self.fixed_height = Some(height);
        self
    }

    pub fn filters(mut self, enabled: bool) -> Self {
        self.enable_filters = enabled;
        self
    }

    pub fn checkbox(mut self, enabled: bool) -> Self {
        self.enable_checkbox = enabled;
        self
    }

    pub fn checkbox_selector(mut self, field: impl Into<String>) -> Self {
        self.checkbox_selector = field.into();
        self
    }

    pub fn skeleton_rows(mut self, rows: u16) -> Self {
        self.skeleton_rows = rows;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }
}

/// Serialized table definition: options plus the column tree.
///
/// # Example
///
/// ```
/// use grouped_table::TableConfig;
///
/// let config = TableConfig::from_json(r#"{
///     "options": { "enable_sort": true },
///     "columns": [
///         { "label": "Name", "id": "name" },
///         { "label": "Other", "children": [{ "label": "Age", "id": "age" }] }
///     ]
/// }"#).unwrap();
///
/// assert!(config.options.enable_sort);
/// assert_eq!(config.column_tree().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub options: TableOptions,
    pub columns: Vec<ColumnSpec>,
}

impl TableConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the column specs into a column tree.
    pub fn column_tree(&self) -> Result<Vec<ColumnNode>, ConfigError> {
        Ok(columns_from_specs(self.columns.clone())?)
    }
}

/// Parse a JSON array of objects into rows.
pub fn rows_from_json(json: &str) -> Result<Vec<Row>, ConfigError> {
    Ok(serde_json::from_str(json)?)
}
