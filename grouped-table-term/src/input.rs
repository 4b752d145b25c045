//! Turns terminal events into table operations.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use grouped_table::GroupedTable;
use log::debug;

use crate::hit::Target;
use crate::paint::{PaintState, TableFrame};

/// What the caller should do after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The event didn't concern the table.
    Ignored,
    /// Table or view state changed; repaint.
    Redraw,
    /// A column asked to navigate to this target.
    Navigate(String),
    Quit,
}

/// View state that lives outside the table: body scroll and filter focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableInput {
    scroll: u16,
    focus: Option<String>,
}

impl TableInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Leaf id of the focused filter input.
    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn paint_state(&self) -> PaintState<'_> {
        PaintState {
            scroll: self.scroll,
            focus: self.focus.as_deref(),
        }
    }

    /// Apply `event` to `table`. `frame` is the last painted frame.
    pub fn handle(&mut self, table: &mut GroupedTable, frame: &TableFrame, event: &Event) -> Action {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(table, frame, key),
            Event::Mouse(mouse) => self.handle_mouse(table, frame, mouse),
            Event::Resize(..) => Action::Redraw,
            _ => Action::Ignored,
        }
    }

    fn handle_key(&mut self, table: &mut GroupedTable, frame: &TableFrame, key: &KeyEvent) -> Action {
        if let Some(column) = self.focus.clone() {
            let mut text = table.filters().get(&column).unwrap_or_default().to_string();
            match key.code {
                KeyCode::Char(c) => text.push(c),
                KeyCode::Backspace => {
                    text.pop();
                }
                KeyCode::Esc | KeyCode::Enter => {
                    self.focus = None;
                    return Action::Redraw;
                }
                KeyCode::Tab => {
                    self.focus = next_filter(table, &column, 1);
                    return Action::Redraw;
                }
                KeyCode::BackTab => {
                    self.focus = next_filter(table, &column, -1);
                    return Action::Redraw;
                }
                _ => return Action::Ignored,
            }
            table.set_filter(&column, &text);
            return Action::Redraw;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            KeyCode::Up => self.scroll_by(frame, -1),
            KeyCode::Down => self.scroll_by(frame, 1),
            KeyCode::PageUp => self.scroll_by(frame, -i32::from(frame.viewport.max(1))),
            KeyCode::PageDown => self.scroll_by(frame, i32::from(frame.viewport.max(1))),
            KeyCode::Home => self.scroll_by(frame, -i32::from(frame.max_scroll)),
            KeyCode::End => self.scroll_by(frame, i32::from(frame.max_scroll)),
            KeyCode::Tab if table.options().enable_filters => {
                self.focus = table.flat().leaf_columns.first().map(|leaf| leaf.id.clone());
                Action::Redraw
            }
            _ => Action::Ignored,
        }
    }

    fn handle_mouse(&mut self, table: &mut GroupedTable, frame: &TableFrame, mouse: &MouseEvent) -> Action {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(frame, -1),
            MouseEventKind::ScrollDown => self.scroll_by(frame, 1),
            MouseEventKind::Down(MouseButton::Left) => {
                let target = frame.hits.hit_test(mouse.column, mouse.row).cloned();
                debug!("click at ({}, {}) on {target:?}", mouse.column, mouse.row);
                self.focus = None;
                match target {
                    Some(Target::SortHeader(column)) => table.request_sort(&column),
                    Some(Target::SelectAll) => table.toggle_all(),
                    Some(Target::RowCheckbox(key)) => table.toggle_row(&key),
                    Some(Target::DataCell { row, column }) => {
                        if let Some(target) = table.click_cell(row, &column).navigate_to {
                            return Action::Navigate(target);
                        }
                    }
                    Some(Target::FilterInput(column)) => self.focus = Some(column),
                    None => {}
                }
                Action::Redraw
            }
            _ => Action::Ignored,
        }
    }

    fn scroll_by(&mut self, frame: &TableFrame, delta: i32) -> Action {
        let scroll = (i32::from(frame.scroll) + delta).clamp(0, i32::from(frame.max_scroll));
        self.scroll = u16::try_from(scroll).unwrap_or(0);
        if self.scroll == frame.scroll {
            Action::Ignored
        } else {
            Action::Redraw
        }
    }
}

/// The filter column `step` positions away from `current`, wrapping around.
fn next_filter(table: &GroupedTable, current: &str, step: isize) -> Option<String> {
    let leaves = &table.flat().leaf_columns;
    let count = leaves.len() as isize;
    if count == 0 {
        return None;
    }
    let index = leaves.iter().position(|leaf| leaf.id == current).unwrap_or(0) as isize;
    let next = (index + step).rem_euclid(count) as usize;
    Some(leaves[next].id.clone())
}
