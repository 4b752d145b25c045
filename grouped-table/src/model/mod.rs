//! Table data model: dynamic rows and the column tree.

mod column;
mod row;
mod value;

pub use column::{
    columns_from_specs, Align, CellStyle, ClickFn, ColorFn, ColumnGroup, ColumnNode, ColumnSpec,
    FormatFn, LeafColumn, NavigateFn,
};
pub use row::Row;
pub use value::Value;
