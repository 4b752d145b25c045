//! Table geometry.
//!
//! Resolves grid column widths, places span-annotated cells the way HTML
//! tables do, and sizes every line from the wrapped content of its cells.
//! Coordinates are relative to the top-left corner of the table canvas: the
//! head section starts at line 0 and the body section follows it.

mod rect;

pub use rect::Rect;

use grouped_table::{CellKind, GridColumn, TableView, ViewCell, ViewRow};
use log::warn;

use crate::text::cell_lines;

/// Width of the checkbox column.
pub const SELECTION_WIDTH: u16 = 3;

/// Narrowest a flexible column gets when it has no minimum width.
pub const MIN_COLUMN_WIDTH: u16 = 4;

/// Cells reserved after a sortable header label for the sort arrow.
pub const SORT_ARROW_WIDTH: u16 = 2;

// =============================================================================
// Column widths
// =============================================================================

/// Resolve the content width of every grid column for a table
/// `available` cells wide.
///
/// The checkbox column and columns with a fixed width keep their size. The
/// space left over is shared evenly by the flexible columns on top of their
/// minimum widths. When the table doesn't fit, flexible columns shrink to
/// their minimum and the table overflows.
pub fn column_widths(grid: &[GridColumn], available: u16, borders: bool) -> Vec<u16> {
    let count = u16::try_from(grid.len()).unwrap_or(u16::MAX);
    let separators = if borders {
        count.saturating_add(1)
    } else {
        count.saturating_sub(1)
    };
    let inner = available.saturating_sub(separators);

    let mut widths = Vec::with_capacity(grid.len());
    let mut flexible = Vec::new();
    for (index, column) in grid.iter().enumerate() {
        let width = match column {
            GridColumn::Selection => SELECTION_WIDTH,
            GridColumn::Leaf {
                width: Some(width),
                min_width,
                ..
            } => (*width).max(min_width.unwrap_or(0)),
            GridColumn::Leaf { min_width, .. } => {
                flexible.push(index);
                min_width.unwrap_or(MIN_COLUMN_WIDTH)
            }
        };
        widths.push(width);
    }

    let used = widths.iter().fold(0u16, |sum, w| sum.saturating_add(*w));
    let spare = inner.saturating_sub(used);
    if !flexible.is_empty() && spare > 0 {
        let shares = u16::try_from(flexible.len()).unwrap_or(u16::MAX);
        let (each, extra) = (spare / shares, spare % shares);
        for (n, index) in flexible.into_iter().enumerate() {
            let share = each + u16::from((n as u16) < extra);
            widths[index] = widths[index].saturating_add(share);
        }
    }
    widths
}

// =============================================================================
// Cell placement
// =============================================================================

/// Grid position of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index of the row in its section.
    pub row: usize,
    /// Index of the cell in its row.
    pub cell: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

/// Place the cells of `rows` on a grid `columns` wide.
///
/// Each cell takes the first column not yet covered by a cell spanning down
/// from an earlier row. Spans are clamped to the grid. Cells that find no
/// free column are dropped.
pub fn place(rows: &[ViewRow], columns: usize) -> Vec<Placement> {
    let mut occupied = vec![vec![false; columns]; rows.len()];
    let mut placements = Vec::new();

    for (r, row) in rows.iter().enumerate() {
        let mut col = 0;
        for (index, cell) in row.cells.iter().enumerate() {
            while col < columns && occupied[r][col] {
                col += 1;
            }
            if col >= columns {
                warn!(
                    "row {r} overflows the grid; dropping {} cell(s)",
                    row.cells.len() - index
                );
                break;
            }

            let col_span = usize::from(cell.col_span.max(1)).min(columns - col);
            let row_span = usize::from(cell.row_span.max(1)).min(rows.len() - r);
            for line in &mut occupied[r..r + row_span] {
                line[col..col + col_span].fill(true);
            }
            placements.push(Placement {
                row: r,
                cell: index,
                col,
                row_span,
                col_span,
            });
            col += col_span;
        }
    }
    placements
}

// =============================================================================
// Line heights
// =============================================================================

/// Lines `cell` needs in a column `width` cells wide.
pub fn content_lines(cell: &ViewCell, width: u16, ellipsis: bool) -> u16 {
    let width = usize::from(width);
    let lines = match &cell.kind {
        CellKind::LeafHeader { label, sort, .. } => {
            let reserved = if sort.is_some() { SORT_ARROW_WIDTH } else { 0 };
            cell_lines(label, width.saturating_sub(usize::from(reserved)), ellipsis).len()
        }
        CellKind::GroupHeader { label } => cell_lines(label, width, ellipsis).len(),
        CellKind::Data { text, .. } | CellKind::Message(text) => {
            cell_lines(text, width, ellipsis).len()
        }
        _ => 1,
    };
    u16::try_from(lines.max(1)).unwrap_or(u16::MAX)
}

/// Geometry of the head or the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLayout {
    /// Content lines of each row.
    pub heights: Vec<u16>,
    /// Offset of each row's top edge, plus one past the last row. With
    /// borders the edge is the separator line above the row.
    pub ys: Vec<u16>,
    pub placements: Vec<Placement>,
}

impl SectionLayout {
    fn compute(rows: &[ViewRow], xs: &[u16], borders: bool, ellipsis: bool) -> Self {
        let columns = xs.len().saturating_sub(1);
        let placements = place(rows, columns);
        let b = u16::from(borders);
        let span_width = |p: &Placement| {
            xs[p.col + p.col_span]
                .saturating_sub(xs[p.col])
                .saturating_sub(1)
        };
        let need = |p: &Placement| content_lines(&rows[p.row].cells[p.cell], span_width(p), ellipsis);

        let mut heights = vec![1u16; rows.len()];
        for p in placements.iter().filter(|p| p.row_span == 1) {
            heights[p.row] = heights[p.row].max(need(p));
        }

        let mut spanning: Vec<&Placement> = placements.iter().filter(|p| p.row_span > 1).collect();
        spanning.sort_by_key(|p| p.row_span);
        for p in spanning {
            let span = p.row..p.row + p.row_span;
            let rows_below = u16::try_from(p.row_span - 1).unwrap_or(u16::MAX);
            let available = heights[span.clone()]
                .iter()
                .fold(b.saturating_mul(rows_below), |sum, h| sum.saturating_add(*h));
            let needed = need(p);
            if needed > available {
                let last = &mut heights[span.end - 1];
                *last = last.saturating_add(needed - available);
            }
        }

        let mut ys = Vec::with_capacity(rows.len() + 1);
        let mut y = 0u16;
        ys.push(y);
        for height in &heights {
            y = y.saturating_add(height.saturating_add(b));
            ys.push(y);
        }

        Self {
            heights,
            ys,
            placements,
        }
    }

    /// Lines the section occupies, borders included.
    pub fn total(&self, borders: bool) -> u16 {
        self.ys
            .last()
            .copied()
            .unwrap_or(0)
            .saturating_add(u16::from(borders))
    }
}

// =============================================================================
// TableLayout
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Head,
    Body,
}

/// Outer edges and content area of a placed cell, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBox {
    pub left: u16,
    pub top: u16,
    /// Column of the right border. Without borders, one past the content.
    pub right: u16,
    pub bottom: u16,
    pub content: Rect,
}

/// Geometry of a whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub widths: Vec<u16>,
    /// Offset of each grid column's left edge, plus one past the last.
    pub xs: Vec<u16>,
    pub head: SectionLayout,
    pub body: SectionLayout,
    pub borders: bool,
}

impl TableLayout {
    pub fn compute(view: &TableView, available_width: u16) -> Self {
        let widths = column_widths(&view.grid, available_width, view.borders);
        let mut xs = Vec::with_capacity(widths.len() + 1);
        let mut x = 0u16;
        xs.push(x);
        for width in &widths {
            x = x.saturating_add(width.saturating_add(1));
            xs.push(x);
        }

        let head = SectionLayout::compute(&view.head, &xs, view.borders, view.ellipsis);
        let body = SectionLayout::compute(&view.body, &xs, view.borders, view.ellipsis);
        Self {
            widths,
            xs,
            head,
            body,
            borders: view.borders,
        }
    }

    fn b(&self) -> u16 {
        u16::from(self.borders)
    }

    /// Width of the table, borders included.
    pub fn width(&self) -> u16 {
        let last = self.xs.last().copied().unwrap_or(0);
        if self.borders {
            last.saturating_add(1)
        } else {
            last.saturating_sub(1)
        }
    }

    /// Canvas line of the body section's top edge. With borders the head's
    /// bottom border doubles as the body's top border.
    pub fn body_origin(&self) -> u16 {
        self.head.total(self.borders).saturating_sub(self.b())
    }

    /// Lines above the first body content line.
    pub fn head_lines(&self) -> u16 {
        self.head.total(self.borders)
    }

    /// Body content lines, without the shared top border and the closing
    /// bottom border.
    pub fn body_lines(&self) -> u16 {
        self.body.total(self.borders).saturating_sub(2 * self.b())
    }

    pub fn canvas_height(&self) -> u16 {
        self.body_origin().saturating_add(self.body.total(self.borders))
    }

    /// Body lines visible at once.
    pub fn viewport(&self, fixed_height: Option<u16>) -> u16 {
        let lines = self.body_lines();
        fixed_height.map_or(lines, |height| height.min(lines))
    }

    /// Largest useful body scroll offset.
    pub fn max_scroll(&self, fixed_height: Option<u16>) -> u16 {
        self.body_lines().saturating_sub(self.viewport(fixed_height))
    }

    pub fn section(&self, section: Section) -> &SectionLayout {
        match section {
            Section::Head => &self.head,
            Section::Body => &self.body,
        }
    }

    pub fn cell_box(&self, section: Section, p: &Placement) -> CellBox {
        let b = self.b();
        let (layout, origin) = match section {
            Section::Head => (&self.head, 0),
            Section::Body => (&self.body, self.body_origin()),
        };
        let left = self.xs[p.col];
        let right = self.xs[p.col + p.col_span];
        let top = origin.saturating_add(layout.ys[p.row]);
        let bottom = origin.saturating_add(layout.ys[p.row + p.row_span]);
        CellBox {
            left,
            top,
            right: if self.borders {
                right
            } else {
                right.saturating_sub(1)
            },
            bottom,
            content: Rect::new(
                left.saturating_add(b),
                top.saturating_add(b),
                right.saturating_sub(left).saturating_sub(1),
                bottom.saturating_sub(top).saturating_sub(b),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(width: Option<u16>, min_width: Option<u16>) -> GridColumn {
        GridColumn::Leaf {
            id: "x".into(),
            width,
            min_width,
        }
    }

    #[test]
    fn test_flexible_columns_share_spare_space() {
        let grid = vec![GridColumn::Selection, leaf(Some(10), None), leaf(None, None), leaf(None, None)];
        // 40 wide with borders: 5 separator columns, 35 content.
        let widths = column_widths(&grid, 40, true);
        assert_eq!(widths, vec![3, 10, 11, 11]);
    }

    #[test]
    fn test_remainder_goes_to_first_columns() {
        let grid = vec![leaf(None, None), leaf(None, None), leaf(None, None)];
        // 16 wide without borders: 2 gaps, 14 content.
        assert_eq!(column_widths(&grid, 16, false), vec![5, 5, 4]);
    }

    #[test]
    fn test_min_width_when_cramped() {
        let grid = vec![leaf(Some(2), Some(6)), leaf(None, Some(8)), leaf(None, None)];
        assert_eq!(column_widths(&grid, 5, false), vec![6, 8, 4]);
    }

    #[test]
    fn test_row_span_blocks_columns_below() {
        let rows = vec![
            ViewRow {
                kind: grouped_table::RowKind::Header(0),
                cells: vec![
                    ViewCell::new(CellKind::Blank).row_span(2),
                    ViewCell::new(CellKind::Blank).col_span(2),
                ],
            },
            ViewRow {
                kind: grouped_table::RowKind::Header(1),
                cells: vec![ViewCell::new(CellKind::Blank), ViewCell::new(CellKind::Blank)],
            },
        ];
        let cols: Vec<(usize, usize)> = place(&rows, 3).iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(cols, vec![(0, 0), (0, 1), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_spans_clamped_to_grid() {
        let rows = vec![ViewRow {
            kind: grouped_table::RowKind::Empty,
            cells: vec![
                ViewCell::new(CellKind::Message("none".into())).col_span(9).row_span(4),
                ViewCell::new(CellKind::Blank),
            ],
        }];
        let placements = place(&rows, 3);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].col_span, 3);
        assert_eq!(placements[0].row_span, 1);
    }
}
