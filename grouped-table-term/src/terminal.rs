use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::{Buffer, Cell, TextStyle};
use crate::error::TermError;
use crate::text::char_width;
use crate::theme::Rgb;

/// Owns the terminal while the UI runs: raw mode, the alternate screen and
/// mouse capture are enabled on creation and restored on drop.
pub struct Terminal {
    stdout: io::Stdout,
    current: Buffer,
    previous: Buffer,
    /// Forces a full repaint on the next flush.
    dirty: bool,
}

impl Terminal {
    pub fn new() -> Result<Self, TermError> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            current: Buffer::new(width, height),
            previous: Buffer::new(width, height),
            dirty: true,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    /// Wait up to `timeout` for events and drain everything pending.
    pub fn poll(&self, timeout: Duration) -> Result<Vec<Event>, TermError> {
        let mut events = Vec::new();
        if event::poll(timeout)? {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }
        Ok(events)
    }

    /// Draw a frame: `f` paints into a buffer cleared to `blank`, then only
    /// the cells that changed since the last frame are written out.
    pub fn draw<R>(&mut self, blank: Cell, f: impl FnOnce(&mut Buffer) -> R) -> Result<R, TermError> {
        let (width, height) = terminal::size()?;
        if width != self.current.width() || height != self.current.height() {
            self.current = Buffer::new(width, height);
            self.previous = Buffer::new(width, height);
            self.dirty = true;
        }

        self.current.clear(blank);
        let result = f(&mut self.current);
        self.flush()?;
        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(result)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.dirty {
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
            // Differs from every cell, so the whole screen is written.
            self.previous.clear(Cell::new('\0'));
            self.dirty = false;
        }

        let mut next: Option<(u16, u16)> = None;
        let mut fg = None;
        let mut bg = None;
        let mut style = TextStyle::new();
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current.diff(&self.previous) {
            if cell.wide_continuation {
                continue;
            }
            if next != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }
            if fg != Some(cell.fg) {
                queue!(self.stdout, SetForegroundColor(color(cell.fg)))?;
                fg = Some(cell.fg);
            }
            if bg != Some(cell.bg) {
                queue!(self.stdout, SetBackgroundColor(color(cell.bg)))?;
                bg = Some(cell.bg);
            }
            if cell.style != style {
                // Reset also clears colors; reapply them with the attributes.
                queue!(self.stdout, SetAttribute(Attribute::Reset))?;
                queue!(
                    self.stdout,
                    SetForegroundColor(color(cell.fg)),
                    SetBackgroundColor(color(cell.bg))
                )?;
                for (on, attribute) in [
                    (cell.style.bold, Attribute::Bold),
                    (cell.style.dim, Attribute::Dim),
                    (cell.style.italic, Attribute::Italic),
                    (cell.style.underline, Attribute::Underlined),
                ] {
                    if on {
                        queue!(self.stdout, SetAttribute(attribute))?;
                    }
                }
                style = cell.style;
            }

            write!(self.stdout, "{}", cell.char)?;
            let advance = char_width(cell.char).max(1) as u16;
            next = Some((x.saturating_add(advance), y));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
