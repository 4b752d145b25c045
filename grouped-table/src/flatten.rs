//! Column-tree flattening.
//!
//! Turns the recursive column tree into header rows annotated with row and
//! column spans, plus the ordered list of leaf columns used by the body and
//! the filter row.

use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::model::{Align, CellStyle, ColumnGroup, ColumnNode, LeafColumn};

/// One cell of a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    /// Leaf identifier; `None` for groups.
    pub id: Option<String>,
    pub has_children: bool,
    /// Header depth minus the node's level.
    pub row_span: u16,
    /// Number of leaf descendants; `None` for leaves.
    pub col_span: Option<u16>,
    pub align: Align,
    pub width: Option<u16>,
    pub min_width: Option<u16>,
    pub style: CellStyle,
}

impl HeaderCell {
    fn leaf(leaf: &LeafColumn, row_span: u16) -> Self {
        Self {
            label: leaf.label.clone(),
            id: Some(leaf.id.clone()),
            has_children: false,
            row_span,
            col_span: None,
            align: leaf.align,
            width: leaf.width,
            min_width: leaf.min_width,
            style: leaf.style.clone(),
        }
    }

    fn group(group: &ColumnGroup, row_span: u16, col_span: u16) -> Self {
        Self {
            label: group.label.clone(),
            id: None,
            has_children: true,
            row_span,
            col_span: Some(col_span),
            align: group.align,
            width: group.width,
            min_width: group.min_width,
            style: group.style.clone(),
        }
    }
}

/// Result of flattening a column tree.
#[derive(Debug, Clone, Default)]
pub struct FlatColumns {
    /// One entry per header level, cells in left-to-right order.
    pub header_rows: Vec<Vec<HeaderCell>>,
    /// Leaves, deduplicated by id, in first-encountered breadth-first order.
    pub leaf_columns: Vec<LeafColumn>,
    /// Number of header rows.
    pub depth: u16,
}

impl FlatColumns {
    pub fn leaf(&self, id: &str) -> Option<&LeafColumn> {
        self.leaf_columns.iter().find(|leaf| leaf.id == id)
    }
}

/// Number of header rows needed for `tree`.
///
/// An empty tree needs none; otherwise one row for the top level plus one for
/// every nesting level below it.
pub fn header_depth(tree: &[ColumnNode]) -> u16 {
    tree.iter()
        .map(ColumnNode::height)
        .max()
        .map_or(0, |height| height + 1)
}

/// Flatten a column tree, one header row per tree level.
pub fn flatten(tree: &[ColumnNode]) -> FlatColumns {
    let depth = header_depth(tree);
    let mut queue: VecDeque<&ColumnNode> = tree.iter().collect();
    let mut header_rows = Vec::with_capacity(depth as usize);
    let mut leaf_columns: Vec<LeafColumn> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut level: u16 = 0;

    while !queue.is_empty() {
        let level_len = queue.len();
        let mut row = Vec::with_capacity(level_len);
        let row_span = depth.saturating_sub(level);

        for _ in 0..level_len {
            let Some(node) = queue.pop_front() else {
                break;
            };
            match node {
                ColumnNode::Group(group) => {
                    let col_span = u16::try_from(node.leaf_count()).unwrap_or(u16::MAX);
                    row.push(HeaderCell::group(group, row_span, col_span));
                    queue.extend(group.children());
                    for leaf in node.leaves() {
                        if seen.insert(leaf.id.as_str()) {
                            leaf_columns.push(leaf.clone());
                        }
                    }
                }
                ColumnNode::Leaf(leaf) => {
                    row.push(HeaderCell::leaf(leaf, row_span));
                    if seen.insert(leaf.id.as_str()) {
                        leaf_columns.push(leaf.clone());
                    }
                }
            }
        }

        header_rows.push(row);
        level += 1;
    }

    debug!(
        "flattened column tree: {} header rows, {} leaf columns",
        header_rows.len(),
        leaf_columns.len()
    );

    FlatColumns {
        header_rows,
        leaf_columns,
        depth,
    }
}
