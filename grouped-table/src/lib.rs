//! Data table with grouped (multi-level) column headers.
//!
//! The crate is toolkit-neutral: [`GroupedTable`] owns the columns, rows and
//! the sort/selection/filter state, and [`GroupedTable::render`] describes
//! the table as a [`TableView`] of span-annotated cells. A toolkit such as
//! `grouped-table-term` draws that view and feeds user input back into the
//! table's event handlers.

pub mod compare;
pub mod error;
pub mod flatten;
pub mod model;
pub mod options;
pub mod render;
pub mod state;
pub mod table;
pub mod view;

pub use compare::{compare, Order};
pub use error::{ColumnError, ConfigError};
pub use flatten::{flatten, header_depth, FlatColumns, HeaderCell};
pub use model::{Align, CellStyle, ColumnGroup, ColumnNode, ColumnSpec, LeafColumn, Row, Value};
pub use options::{rows_from_json, TableConfig, TableOptions};
pub use state::{FilterMap, Selection, SortState};
pub use table::{CellClick, GroupedTable};
pub use view::{CellKind, GridColumn, RowKind, SortLabel, TableView, ViewCell, ViewRow};
