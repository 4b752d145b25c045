//! The table orchestrator.
//!
//! [`GroupedTable`] owns the column tree, the rows and the sort, selection and
//! filter state. Event handlers mutate that state; [`GroupedTable::render`]
//! turns it into a [`TableView`].

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::compare::compare;
use crate::error::ColumnError;
use crate::flatten::{flatten, FlatColumns};
use crate::model::{ColumnNode, Row};
use crate::options::TableOptions;
use crate::render::{body_rows, filter_row, header_rows, BodyContext, HeaderContext, SelectionSummary};
use crate::state::{FilterMap, Selection, SortState};
use crate::view::{GridColumn, TableView};

type FilterCallback = Box<dyn FnMut(&FilterMap)>;
type SelectionCallback = Box<dyn FnMut(&[String])>;

/// Outcome of clicking a body cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellClick {
    /// The row's selection was toggled.
    pub toggled: bool,
    /// The column's click callback ran.
    pub clicked: bool,
    /// Navigation target supplied by the column.
    pub navigate_to: Option<String>,
}

/// A data table with grouped column headers.
///
/// # Example
///
/// ```
/// use grouped_table::{ColumnNode, GroupedTable, Row, TableOptions};
///
/// let columns = vec![
///     ColumnNode::leaf("name", "Name"),
///     ColumnNode::group("Other", vec![ColumnNode::leaf("age", "Age")]).unwrap(),
/// ];
/// let mut table = GroupedTable::new(columns, TableOptions::new().sort(true)).unwrap();
/// table.set_rows(Some(vec![
///     Row::new().set("id", 1).set("name", "Bob").set("age", 40),
///     Row::new().set("id", 2).set("name", "Ann").set("age", 30),
/// ]));
///
/// table.request_sort("name");
/// let view = table.render();
/// assert_eq!(view.head.len(), 2);
/// assert_eq!(view.body[0].cells[0].text(), Some("Ann"));
/// ```
pub struct GroupedTable {
    columns: Arc<Vec<ColumnNode>>,
    flat: FlatColumns,
    rows: Option<Vec<Row>>,
    options: TableOptions,
    sort: SortState,
    selection: Selection,
    filters: FilterMap,
    on_filter_change: Option<FilterCallback>,
    on_selection_change: Option<SelectionCallback>,
}

impl GroupedTable {
    /// Create a table over `columns`. The column tree must not be empty.
    pub fn new(
        columns: impl Into<Arc<Vec<ColumnNode>>>,
        options: TableOptions,
    ) -> Result<Self, ColumnError> {
        let columns = columns.into();
        if columns.is_empty() {
            return Err(ColumnError::EmptyTree);
        }
        let flat = flatten(&columns);
        Ok(Self {
            columns,
            flat,
            rows: None,
            options,
            sort: SortState::new(),
            selection: Selection::new(),
            filters: FilterMap::new(),
            on_filter_change: None,
            on_selection_change: None,
        })
    }

    /// Called with the full filter map after every filter input change.
    pub fn on_filter_change(mut self, f: impl FnMut(&FilterMap) + 'static) -> Self {
        self.on_filter_change = Some(Box::new(f));
        self
    }

    /// Called with every selected key after every selection change.
    pub fn on_selection_change(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(f));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn columns(&self) -> &Arc<Vec<ColumnNode>> {
        &self.columns
    }

    pub fn flat(&self) -> &FlatColumns {
        &self.flat
    }

    /// `None` while loading.
    pub fn rows(&self) -> Option<&[Row]> {
        self.rows.as_deref()
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Replace the column tree.
    ///
    /// The flattened header is recomputed only when `columns` is a different
    /// tree than the current one.
    pub fn set_columns(&mut self, columns: impl Into<Arc<Vec<ColumnNode>>>) -> Result<(), ColumnError> {
        let columns = columns.into();
        if Arc::ptr_eq(&columns, &self.columns) {
            return Ok(());
        }
        if columns.is_empty() {
            return Err(ColumnError::EmptyTree);
        }
        self.flat = flatten(&columns);
        self.columns = columns;
        Ok(())
    }

    /// Replace the rows. `None` shows the loading state.
    ///
    /// An active sort is applied to the new rows.
    pub fn set_rows(&mut self, rows: Option<Vec<Row>>) {
        self.rows = rows;
        self.apply_sort();
    }

    pub fn set_options(&mut self, options: TableOptions) {
        self.options = options;
        self.apply_sort();
    }

    // =========================================================================
    // Event handlers
    // =========================================================================

    /// Handle a click on a leaf header.
    ///
    /// Clicking the current sort column flips the direction; clicking another
    /// column sorts it ascending. Rows are reordered in place.
    pub fn request_sort(&mut self, column: &str) {
        if !self.options.enable_sort {
            warn!("sort requested on '{column}' while sorting is disabled");
            return;
        }
        if self.flat.leaf(column).is_none() {
            warn!("sort requested on unknown column '{column}'");
            return;
        }
        self.sort.request(column);
        debug!("sorting by '{column}' {}", self.sort.order);
        self.apply_sort();
    }

    /// Toggle the selection of the row with `key`.
    pub fn toggle_row(&mut self, key: &str) {
        if !self.options.enable_checkbox {
            warn!("row selection is disabled; ignoring toggle of '{key}'");
            return;
        }
        let selected = self.selection.toggle(key);
        debug!(
            "row '{key}' {}",
            if selected { "selected" } else { "deselected" }
        );
        self.report_selection();
    }

    /// Select every selectable row, or clear the selection if every
    /// selectable row is already selected.
    pub fn toggle_all(&mut self) {
        if !self.options.enable_checkbox {
            warn!("row selection is disabled; ignoring select all");
            return;
        }
        let keys = self.selectable_keys();
        if keys.is_empty() {
            return;
        }
        if keys.iter().all(|key| self.selection.is_selected(key)) {
            self.selection.clear();
            debug!("selection cleared");
        } else {
            debug!("selecting all {} rows", keys.len());
            self.selection.select_all(keys);
        }
        self.report_selection();
    }

    /// Handle a keystroke in `column`'s filter input; `text` is the input's
    /// full new contents.
    pub fn set_filter(&mut self, column: &str, text: &str) {
        self.filters.apply_input(column, text);
        debug!("filters now {:?}", self.filters);
        if let Some(callback) = self.on_filter_change.as_mut() {
            callback(&self.filters);
        }
    }

    /// Handle a click on the body cell at (`row_index`, `column`).
    ///
    /// With row selection enabled the click toggles the row; otherwise the
    /// column's click callback runs.
    pub fn click_cell(&mut self, row_index: usize, column: &str) -> CellClick {
        let Some(row) = self.rows.as_ref().and_then(|rows| rows.get(row_index)) else {
            return CellClick::default();
        };
        let Some(leaf) = self.flat.leaf(column) else {
            return CellClick::default();
        };

        let navigate_to = leaf.navigation_target(row);
        if self.options.enable_checkbox {
            match row.key(&self.options.checkbox_selector) {
                Some(key) => {
                    self.toggle_row(&key);
                    CellClick {
                        toggled: true,
                        clicked: false,
                        navigate_to,
                    }
                }
                None => {
                    warn!(
                        "row {row_index} has no '{}' field and cannot be selected",
                        self.options.checkbox_selector
                    );
                    CellClick {
                        navigate_to,
                        ..Default::default()
                    }
                }
            }
        } else {
            CellClick {
                toggled: false,
                clicked: leaf.click(row),
                navigate_to,
            }
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Describe the table as it should currently be drawn.
    pub fn render(&self) -> TableView {
        let selection_enabled = self.options.enable_checkbox;
        let leaves = &self.flat.leaf_columns;

        let mut head = header_rows(
            &self.flat,
            HeaderContext {
                sort: self.options.enable_sort.then_some(&self.sort),
                selection: selection_enabled.then(|| self.selection_summary()),
            },
        );
        if self.options.enable_filters {
            head.push(filter_row(leaves, &self.filters, selection_enabled));
        }

        let body = body_rows(
            leaves,
            self.rows.as_deref(),
            BodyContext {
                selector: selection_enabled.then_some(self.options.checkbox_selector.as_str()),
                selection: &self.selection,
                skeleton_rows: self.options.skeleton_rows,
                empty_message: &self.options.empty_message,
            },
        );

        let mut grid = Vec::with_capacity(leaves.len() + 1);
        if selection_enabled {
            grid.push(GridColumn::Selection);
        }
        grid.extend(leaves.iter().map(|leaf| GridColumn::Leaf {
            id: leaf.id.clone(),
            width: leaf.width,
            min_width: leaf.min_width,
        }));

        TableView {
            head,
            body,
            grid,
            borders: self.options.enable_borders,
            ellipsis: self.options.ellipsis,
            fixed_height: self.options.fixed_height,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply_sort(&mut self) {
        if !self.options.enable_sort {
            return;
        }
        let (Some(key), Some(rows)) = (self.sort.key.as_deref(), self.rows.as_mut()) else {
            return;
        };
        rows.sort_by(compare(self.sort.order, key));
    }

    fn selectable_keys(&self) -> Vec<String> {
        let selector = &self.options.checkbox_selector;
        self.rows
            .iter()
            .flatten()
            .filter_map(|row| row.key(selector))
            .collect()
    }

    fn selection_summary(&self) -> SelectionSummary {
        let keys = self.selectable_keys();
        SelectionSummary {
            selected: keys
                .iter()
                .filter(|key| self.selection.is_selected(key))
                .count(),
            total: keys.len(),
        }
    }

    fn report_selection(&mut self) {
        if let Some(callback) = self.on_selection_change.as_mut() {
            callback(self.selection.keys());
        }
    }
}

impl fmt::Debug for GroupedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedTable")
            .field("columns", &self.columns)
            .field("rows", &self.rows.as_ref().map(Vec::len))
            .field("options", &self.options)
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}
