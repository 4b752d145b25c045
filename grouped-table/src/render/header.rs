//! Header rows.

use crate::flatten::FlatColumns;
use crate::state::SortState;
use crate::view::{CellKind, RowKind, SortLabel, ViewCell, ViewRow};

/// Selected and total counts driving the select-all checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionSummary {
    pub selected: usize,
    pub total: usize,
}

impl SelectionSummary {
    pub fn checked(&self) -> bool {
        self.total > 0 && self.selected == self.total
    }

    pub fn indeterminate(&self) -> bool {
        self.selected > 0 && self.selected < self.total
    }
}

/// Inputs of the header renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderContext<'a> {
    /// Current sort state; `None` when sorting is disabled.
    pub sort: Option<&'a SortState>,
    /// Selection counts; `None` when row selection is disabled.
    pub selection: Option<SelectionSummary>,
}

/// Render one row per header level.
///
/// Group cells span their leaf descendants and one header row. Leaf cells
/// span down to the last header row. The select-all cell, when present,
/// opens the first row and spans every header row.
pub fn header_rows(flat: &FlatColumns, ctx: HeaderContext<'_>) -> Vec<ViewRow> {
    flat.header_rows
        .iter()
        .enumerate()
        .map(|(level, cells)| {
            let mut row = Vec::with_capacity(cells.len() + 1);

            if level == 0 {
                if let Some(summary) = ctx.selection {
                    row.push(
                        ViewCell::new(CellKind::SelectAll {
                            checked: summary.checked(),
                            indeterminate: summary.indeterminate(),
                        })
                        .row_span(flat.depth),
                    );
                }
            }

            for cell in cells {
                let view = match (&cell.id, cell.col_span) {
                    (Some(id), _) => ViewCell::new(CellKind::LeafHeader {
                        id: id.clone(),
                        label: cell.label.clone(),
                        sort: ctx.sort.map(|sort| SortLabel {
                            active: sort.is_sorted_by(id),
                            direction: if sort.is_sorted_by(id) {
                                sort.order
                            } else {
                                Default::default()
                            },
                        }),
                    })
                    .row_span(cell.row_span),
                    (None, span) => ViewCell::new(CellKind::GroupHeader {
                        label: cell.label.clone(),
                    })
                    .col_span(span.unwrap_or(0)),
                };
                row.push(view.align(cell.align).style(cell.style.clone()));
            }

            ViewRow {
                kind: RowKind::Header(u16::try_from(level).unwrap_or(u16::MAX)),
                cells: row,
            }
        })
        .collect()
}
