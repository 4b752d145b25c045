//! Column tree definitions.
//!
//! A table's columns form a tree: leaves map to one body column each, groups
//! label a run of leaves in the header.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::Row;
use crate::error::ColumnError;

/// Formats a row into the text displayed by a leaf cell.
pub type FormatFn = Arc<dyn Fn(&Row) -> String + Send + Sync>;
/// Picks a color token for a leaf cell.
pub type ColorFn = Arc<dyn Fn(&Row) -> Option<String> + Send + Sync>;
/// Called when a leaf cell is clicked.
pub type ClickFn = Arc<dyn Fn(&Row) + Send + Sync>;
/// Resolves a navigation target for a leaf cell.
pub type NavigateFn = Arc<dyn Fn(&Row) -> String + Send + Sync>;

/// Horizontal alignment of a cell's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Presentation overrides applied to every cell of a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub dim: bool,
    /// Color token (`#rrggbb` or a theme name).
    pub foreground: Option<String>,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground = Some(color.into());
        self
    }
}

// =============================================================================
// LeafColumn
// =============================================================================

/// A column that maps to one body column.
#[derive(Clone)]
pub struct LeafColumn {
    /// Row field read by this column; also the sort and filter key.
    pub id: String,
    /// Header text.
    pub label: String,
    pub align: Align,
    /// Fixed width in terminal cells.
    pub width: Option<u16>,
    /// Minimum width in terminal cells.
    pub min_width: Option<u16>,
    pub style: CellStyle,
    format: Option<FormatFn>,
    color: Option<ColorFn>,
    on_click: Option<ClickFn>,
    navigate_to: Option<NavigateFn>,
}

impl LeafColumn {
    /// Create a new leaf column with the given id and label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            align: Align::default(),
            width: None,
            min_width: None,
            style: CellStyle::default(),
            format: None,
            color: None,
            on_click: None,
            navigate_to: None,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, min_width: u16) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    /// Override the displayed value.
    pub fn format(mut self, f: impl Fn(&Row) -> String + Send + Sync + 'static) -> Self {
        self.format = Some(Arc::new(f));
        self
    }

    /// Per-row color token.
    pub fn color(mut self, f: impl Fn(&Row) -> Option<String> + Send + Sync + 'static) -> Self {
        self.color = Some(Arc::new(f));
        self
    }

    pub fn on_click(mut self, f: impl Fn(&Row) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(f));
        self
    }

    pub fn navigate_to(mut self, f: impl Fn(&Row) -> String + Send + Sync + 'static) -> Self {
        self.navigate_to = Some(Arc::new(f));
        self
    }

    /// Text displayed for `row`: the formatter's output, else the field's
    /// display text, else empty.
    pub fn display(&self, row: &Row) -> String {
        match &self.format {
            Some(format) => format(row),
            None => row.text(&self.id),
        }
    }

    /// Color token for `row`, if the column defines one.
    pub fn color_for(&self, row: &Row) -> Option<String> {
        self.color.as_ref().and_then(|color| color(row))
    }

    /// Invoke the click callback. Returns `false` if there is none.
    pub fn click(&self, row: &Row) -> bool {
        match &self.on_click {
            Some(on_click) => {
                on_click(row);
                true
            }
            None => false,
        }
    }

    pub fn navigation_target(&self, row: &Row) -> Option<String> {
        self.navigate_to.as_ref().map(|navigate| navigate(row))
    }
}

impl fmt::Debug for LeafColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafColumn")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("align", &self.align)
            .field("width", &self.width)
            .field("min_width", &self.min_width)
            .field("style", &self.style)
            .field("format", &self.format.is_some())
            .field("color", &self.color.is_some())
            .field("on_click", &self.on_click.is_some())
            .field("navigate_to", &self.navigate_to.is_some())
            .finish()
    }
}

// =============================================================================
// ColumnGroup
// =============================================================================

/// A header-only node grouping one or more child columns.
#[derive(Debug, Clone)]
pub struct ColumnGroup {
    pub label: String,
    pub align: Align,
    pub width: Option<u16>,
    pub min_width: Option<u16>,
    pub style: CellStyle,
    children: Vec<ColumnNode>,
}

impl ColumnGroup {
    /// Create a group. Groups must have at least one child.
    pub fn new(label: impl Into<String>, children: Vec<ColumnNode>) -> Result<Self, ColumnError> {
        let label = label.into();
        if children.is_empty() {
            return Err(ColumnError::EmptyGroup { label });
        }
        Ok(Self {
            label,
            align: Align::default(),
            width: None,
            min_width: None,
            style: CellStyle::default(),
            children,
        })
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, min_width: u16) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    pub fn children(&self) -> &[ColumnNode] {
        &self.children
    }
}

// =============================================================================
// ColumnNode
// =============================================================================

/// A node of the column tree.
#[derive(Debug, Clone)]
pub enum ColumnNode {
    Leaf(LeafColumn),
    Group(ColumnGroup),
}

impl ColumnNode {
    /// Shorthand for a plain leaf node.
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        ColumnNode::Leaf(LeafColumn::new(id, label))
    }

    /// Shorthand for a group node.
    pub fn group(label: impl Into<String>, children: Vec<ColumnNode>) -> Result<Self, ColumnError> {
        ColumnGroup::new(label, children).map(ColumnNode::Group)
    }

    pub fn label(&self) -> &str {
        match self {
            ColumnNode::Leaf(leaf) => &leaf.label,
            ColumnNode::Group(group) => &group.label,
        }
    }

    /// Nesting levels below this node: 0 for a leaf, `1 + max(child height)`
    /// for a group.
    pub fn height(&self) -> u16 {
        match self {
            ColumnNode::Leaf(_) => 0,
            ColumnNode::Group(group) => {
                1 + group.children.iter().map(ColumnNode::height).max().unwrap_or(0)
            }
        }
    }

    /// Number of leaf descendants (1 for a leaf).
    pub fn leaf_count(&self) -> usize {
        match self {
            ColumnNode::Leaf(_) => 1,
            ColumnNode::Group(group) => group.children.iter().map(ColumnNode::leaf_count).sum(),
        }
    }

    /// Leaf descendants in left-to-right order.
    pub fn leaves(&self) -> Vec<&LeafColumn> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a LeafColumn>) {
        match self {
            ColumnNode::Leaf(leaf) => out.push(leaf),
            ColumnNode::Group(group) => {
                for child in &group.children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl From<LeafColumn> for ColumnNode {
    fn from(leaf: LeafColumn) -> Self {
        ColumnNode::Leaf(leaf)
    }
}

impl From<ColumnGroup> for ColumnNode {
    fn from(group: ColumnGroup) -> Self {
        ColumnNode::Group(group)
    }
}

// =============================================================================
// ColumnSpec
// =============================================================================

/// Serialized column definition, as read from configuration.
///
/// Exactly one of `id` and `children` must be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub align: Align,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u16>,
    pub style: CellStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ColumnSpec>>,
}

impl TryFrom<ColumnSpec> for ColumnNode {
    type Error = ColumnError;

    fn try_from(spec: ColumnSpec) -> Result<Self, Self::Error> {
        match (spec.id, spec.children) {
            (Some(id), Some(_)) => Err(ColumnError::Ambiguous {
                label: spec.label,
                id,
            }),
            (None, None) => Err(ColumnError::MissingIdentifier { label: spec.label }),
            (Some(id), None) => {
                let mut leaf = LeafColumn::new(id, spec.label)
                    .align(spec.align)
                    .style(spec.style);
                leaf.width = spec.width;
                leaf.min_width = spec.min_width;
                Ok(ColumnNode::Leaf(leaf))
            }
            (None, Some(children)) => {
                let children = children
                    .into_iter()
                    .map(ColumnNode::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                let mut group = ColumnGroup::new(spec.label, children)?
                    .align(spec.align)
                    .style(spec.style);
                group.width = spec.width;
                group.min_width = spec.min_width;
                Ok(ColumnNode::Group(group))
            }
        }
    }
}

/// Convert a list of specs into a validated column tree.
pub fn columns_from_specs(specs: Vec<ColumnSpec>) -> Result<Vec<ColumnNode>, ColumnError> {
    if specs.is_empty() {
        return Err(ColumnError::EmptyTree);
    }
    specs.into_iter().map(ColumnNode::try_from).collect()
}
