pub mod buffer;
pub mod error;
pub mod hit;
pub mod input;
pub mod layout;
pub mod paint;
pub mod terminal;
pub mod text;
pub mod theme;

pub use buffer::{Buffer, Cell, TextStyle};
pub use error::TermError;
pub use hit::{HitMap, Target};
pub use input::{Action, TableInput};
pub use layout::{Rect, TableLayout};
pub use paint::{paint_table, PaintState, TableFrame};
pub use terminal::Terminal;
pub use theme::{Rgb, Theme};
