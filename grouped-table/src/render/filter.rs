//! Filter row.

use crate::model::LeafColumn;
use crate::state::FilterMap;
use crate::view::{CellKind, RowKind, ViewCell, ViewRow};

/// Render one filter input per leaf column, showing the current filter text.
///
/// Inputs line up with the body's leaf columns. A placeholder fills the
/// selection column when it is shown.
pub fn filter_row(leaves: &[LeafColumn], filters: &FilterMap, selection: bool) -> ViewRow {
    let mut cells = Vec::with_capacity(leaves.len() + 1);
    if selection {
        cells.push(ViewCell::new(CellKind::FilterPlaceholder));
    }
    cells.extend(leaves.iter().map(|leaf| {
        ViewCell::new(CellKind::FilterInput {
            column: leaf.id.clone(),
            value: filters.get(&leaf.id).unwrap_or_default().to_string(),
        })
        .align(leaf.align)
    }));
    ViewRow {
        kind: RowKind::Filter,
        cells,
    }
}
