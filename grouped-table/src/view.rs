//! Toolkit-neutral description of a rendered table.
//!
//! A [`TableView`] is what [`GroupedTable::render`](crate::GroupedTable::render)
//! produces: rows of span-annotated cells plus the physical grid columns they
//! are laid out on. A toolkit turns it into pixels or terminal cells.

use crate::compare::Order;
use crate::model::{Align, CellStyle};

/// Sort affordance on a leaf header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortLabel {
    /// This column is the current sort key.
    pub active: bool,
    /// Direction shown by the affordance (ascending when inactive).
    pub direction: Order,
}

impl SortLabel {
    /// Hidden description of the sort state, if this column is sorted.
    pub fn description(&self) -> Option<String> {
        self.active.then(|| format!("sorted {}", self.direction))
    }
}

/// What a cell shows and how it reacts to input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellKind {
    /// Header cell of a column group. Never sortable.
    GroupHeader { label: String },
    /// Header cell of a leaf column. A sort target when `sort` is set.
    LeafHeader {
        id: String,
        label: String,
        sort: Option<SortLabel>,
    },
    /// Select-all checkbox in the header.
    SelectAll { checked: bool, indeterminate: bool },
    /// Empty cell in the filter row.
    FilterPlaceholder,
    /// Filter text input for a leaf column.
    FilterInput { column: String, value: String },
    /// Selection checkbox of a body row. `key` is `None` for rows that
    /// cannot be selected.
    RowCheckbox { key: Option<String>, checked: bool },
    /// Body cell of a leaf column.
    Data { column: String, text: String },
    /// Loading placeholder.
    Skeleton,
    /// Full-width message, e.g. the empty state.
    Message(String),
    /// Empty cell keeping the grid aligned.
    Blank,
}

/// One cell of a rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCell {
    pub kind: CellKind,
    /// Rows covered, including this one.
    pub row_span: u16,
    /// Grid columns covered.
    pub col_span: u16,
    pub align: Align,
    pub style: CellStyle,
    /// Per-row color token from the column's color callback.
    pub color: Option<String>,
}

impl ViewCell {
    pub fn new(kind: CellKind) -> Self {
        Self {
            kind,
            row_span: 1,
            col_span: 1,
            align: Align::Left,
            style: CellStyle::default(),
            color: None,
        }
    }

    pub fn row_span(mut self, span: u16) -> Self {
        self.row_span = span.max(1);
        self
    }

    pub fn col_span(mut self, span: u16) -> Self {
        self.col_span = span;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    /// Plain text content, if the cell has any.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            CellKind::GroupHeader { label } | CellKind::LeafHeader { label, .. } => Some(label),
            CellKind::FilterInput { value, .. } => Some(value),
            CellKind::Data { text, .. } => Some(text),
            CellKind::Message(message) => Some(message),
            _ => None,
        }
    }
}

/// Role of a rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Header level, starting at 0.
    Header(u16),
    Filter,
    /// Body row for the record at `index`.
    Data {
        index: usize,
        key: Option<String>,
        selected: bool,
    },
    Skeleton,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub kind: RowKind,
    pub cells: Vec<ViewCell>,
}

/// A physical column of the rendered grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridColumn {
    /// The checkbox column.
    Selection,
    /// One leaf column.
    Leaf {
        id: String,
        width: Option<u16>,
        min_width: Option<u16>,
    },
}

/// Everything a toolkit needs to draw the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub head: Vec<ViewRow>,
    pub body: Vec<ViewRow>,
    pub grid: Vec<GridColumn>,
    pub borders: bool,
    pub ellipsis: bool,
    /// Maximum body height; the head stays pinned above it.
    pub fixed_height: Option<u16>,
}

impl TableView {
    pub fn grid_width(&self) -> u16 {
        u16::try_from(self.grid.len()).unwrap_or(u16::MAX)
    }
}
