mod cell;

pub use cell::{Cell, TextStyle};

use crate::layout::Rect;
use crate::text::char_width;
use crate::theme::Rgb;

/// A grid of styled terminal cells.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Cell::default())
    }

    /// A buffer with every cell set to `cell`.
    pub fn filled(width: u16, height: u16, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|idx| &mut self.cells[idx])
    }

    /// Writes outside the buffer are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Cells of `self` that differ from `other`. Both buffers must have the
    /// same size.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        let width = usize::from(self.width.max(1));
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| ((i % width) as u16, (i / width) as u16, cell))
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Set every cell inside `rect` to `cell`.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Set the background of every cell inside `rect`.
    pub fn fill_bg(&mut self, rect: Rect, bg: Rgb) {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.bg = bg;
                }
            }
        }
    }

    /// Write `text` starting at (`x`, `y`), using at most `max_width` cells.
    ///
    /// Cell backgrounds are kept. Returns the number of cells written.
    pub fn put_str(
        &mut self,
        x: u16,
        y: u16,
        max_width: u16,
        text: &str,
        fg: Rgb,
        style: TextStyle,
    ) -> u16 {
        let mut used = 0u16;
        for ch in text.chars() {
            let width = char_width(ch) as u16;
            if width == 0 {
                continue;
            }
            if used.saturating_add(width) > max_width {
                break;
            }
            let cx = x.saturating_add(used);
            if let Some(cell) = self.get_mut(cx, y) {
                cell.char = ch;
                cell.fg = fg;
                cell.style = style;
                cell.wide_continuation = false;
            }
            if width == 2 {
                if let Some(cell) = self.get_mut(cx.saturating_add(1), y) {
                    cell.char = ' ';
                    cell.wide_continuation = true;
                }
            }
            used += width;
        }
        used
    }

    /// Copy at most `max_width` cells of line `src_y` of `src` to (`x`, `y`)
    /// in this buffer.
    pub fn copy_line(&mut self, src: &Buffer, src_y: u16, x: u16, y: u16, max_width: u16) {
        for sx in 0..src.width.min(max_width) {
            if let Some(cell) = src.get(sx, src_y) {
                self.set(x.saturating_add(sx), y, *cell);
            }
        }
    }

    /// Characters of line `y`, without the continuation halves of wide
    /// characters.
    pub fn line(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }
}
