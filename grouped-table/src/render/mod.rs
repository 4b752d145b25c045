//! Pure renderers producing [`ViewRow`](crate::view::ViewRow)s.
//!
//! Each renderer is a function of the flattened columns and the state it is
//! handed; none of them hold state of their own.

pub mod body;
pub mod filter;
pub mod header;

pub use body::{body_rows, BodyContext};
pub use filter::filter_row;
pub use header::{header_rows, HeaderContext, SelectionSummary};
