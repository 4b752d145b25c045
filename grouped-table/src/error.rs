//! Error types

/// Errors raised while building a column tree.
///
/// Rendering never fails; malformed column definitions are rejected here,
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    /// The table was given no columns at all.
    #[error("column tree is empty")]
    EmptyTree,

    /// A group node has no children.
    #[error("column group '{label}' has no children")]
    EmptyGroup { label: String },

    /// A node has neither an identifier nor children.
    #[error("column '{label}' has neither an id nor children")]
    MissingIdentifier { label: String },

    /// A node has both an identifier and children.
    #[error("column '{label}' has both an id ('{id}') and children")]
    Ambiguous { label: String, id: String },
}

/// Errors raised while loading table configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON for the expected shape.
    #[error("invalid table configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The column definitions are malformed.
    #[error(transparent)]
    Column(#[from] ColumnError),
}
