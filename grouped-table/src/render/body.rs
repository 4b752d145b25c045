//! Body rows: loading skeleton, empty state, or one row per record.

use crate::model::{Align, LeafColumn, Row};
use crate::state::Selection;
use crate::view::{CellKind, RowKind, ViewCell, ViewRow};

/// Inputs of the body renderer.
#[derive(Debug, Clone, Copy)]
pub struct BodyContext<'a> {
    /// Row field used as the selection key; `None` when row selection is
    /// disabled.
    pub selector: Option<&'a str>,
    pub selection: &'a Selection,
    pub skeleton_rows: u16,
    pub empty_message: &'a str,
}

/// Render the table body.
///
/// `rows == None` means the data is still loading and yields skeleton rows.
/// An empty slice yields a single message row spanning every grid column.
pub fn body_rows(leaves: &[LeafColumn], rows: Option<&[Row]>, ctx: BodyContext<'_>) -> Vec<ViewRow> {
    let Some(rows) = rows else {
        return (0..ctx.skeleton_rows)
            .map(|_| skeleton_row(leaves, ctx.selector.is_some()))
            .collect();
    };

    if rows.is_empty() {
        let span = leaves.len() + usize::from(ctx.selector.is_some());
        return vec![ViewRow {
            kind: RowKind::Empty,
            cells: vec![
                ViewCell::new(CellKind::Message(ctx.empty_message.to_string()))
                    .col_span(u16::try_from(span).unwrap_or(u16::MAX))
                    .align(Align::Center),
            ],
        }];
    }

    rows.iter()
        .enumerate()
        .map(|(index, row)| data_row(leaves, index, row, ctx))
        .collect()
}

fn skeleton_row(leaves: &[LeafColumn], selection: bool) -> ViewRow {
    let mut cells = Vec::with_capacity(leaves.len() + 1);
    if selection {
        cells.push(ViewCell::new(CellKind::Blank));
    }
    cells.extend(
        leaves
            .iter()
            .map(|leaf| ViewCell::new(CellKind::Skeleton).align(leaf.align)),
    );
    ViewRow {
        kind: RowKind::Skeleton,
        cells,
    }
}

fn data_row(leaves: &[LeafColumn], index: usize, row: &Row, ctx: BodyContext<'_>) -> ViewRow {
    let key = ctx.selector.and_then(|selector| row.key(selector));
    let selected = key
        .as_deref()
        .is_some_and(|key| ctx.selection.is_selected(key));

    let mut cells = Vec::with_capacity(leaves.len() + 1);
    if ctx.selector.is_some() {
        cells.push(ViewCell::new(CellKind::RowCheckbox {
            key: key.clone(),
            checked: selected,
        }));
    }
    cells.extend(leaves.iter().map(|leaf| {
        ViewCell::new(CellKind::Data {
            column: leaf.id.clone(),
            text: leaf.display(row),
        })
        .align(leaf.align)
        .style(leaf.style.clone())
        .color(leaf.color_for(row))
    }));

    ViewRow {
        kind: RowKind::Data {
            index,
            key,
            selected,
        },
        cells,
    }
}
