//! Paints a [`TableView`] into a [`Buffer`].
//!
//! The whole table is drawn onto an offscreen canvas first. The head is then
//! copied to the screen as is and the body through a viewport, so the header
//! stays put while the body scrolls.

use grouped_table::{Align, CellKind, Order, RowKind, TableView, ViewCell, ViewRow};
use log::trace;

use crate::buffer::{Buffer, Cell, TextStyle};
use crate::hit::{HitMap, Target};
use crate::layout::{Rect, SORT_ARROW_WIDTH, Section, TableLayout};
use crate::text::{align_offset, cell_lines, display_width, tail_to_width};
use crate::theme::{Rgb, Theme};

pub const CHECKED: &str = "[x]";
pub const UNCHECKED: &str = "[ ]";
pub const INDETERMINATE: &str = "[-]";
pub const SORT_ASCENDING: char = '▲';
pub const SORT_DESCENDING: char = '▼';
pub const SKELETON: char = '░';

/// Interaction state the painter needs besides the view.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaintState<'a> {
    /// Body lines scrolled past the top of the viewport.
    pub scroll: u16,
    /// Leaf id of the filter input with keyboard focus.
    pub focus: Option<&'a str>,
}

/// Result of painting one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFrame {
    pub hits: HitMap,
    /// Screen area the table covered.
    pub area: Rect,
    /// Scroll offset actually used, after clamping.
    pub scroll: u16,
    pub max_scroll: u16,
    /// Body lines visible at once.
    pub viewport: u16,
}

/// Paint `view` into `area` of `buf`.
pub fn paint_table(
    view: &TableView,
    area: Rect,
    state: PaintState<'_>,
    theme: &Theme,
    buf: &mut Buffer,
) -> TableFrame {
    let layout = TableLayout::compute(view, area.width);
    let blank = Cell::default().with_fg(theme.foreground).with_bg(theme.background);
    let mut canvas = Buffer::filled(layout.width(), layout.canvas_height(), blank);
    let mut mask = view.borders.then(|| LineMask::new(canvas.width(), canvas.height()));
    let mut regions = Vec::new();

    for (section, rows) in [(Section::Head, &view.head), (Section::Body, &view.body)] {
        for p in &layout.section(section).placements {
            let row = &rows[p.row];
            let cell_box = layout.cell_box(section, p);
            if let Some(mask) = mask.as_mut() {
                mask.add_box(cell_box.left, cell_box.top, cell_box.right, cell_box.bottom);
            }
            let mut painter = CellPainter {
                canvas: &mut canvas,
                theme,
                ellipsis: view.ellipsis,
                focus: state.focus,
            };
            if let Some(target) = painter.paint(row, &row.cells[p.cell], cell_box.content) {
                regions.push((section, cell_box.content, target));
            }
        }
    }
    if let Some(mask) = mask {
        mask.draw(&mut canvas, theme.border);
    }

    let viewport = layout.viewport(view.fixed_height);
    let max_scroll = layout.max_scroll(view.fixed_height);
    let scroll = state.scroll.min(max_scroll);
    let head_lines = layout.head_lines();
    let body_start = head_lines.saturating_add(scroll);
    let body_end = body_start.saturating_add(viewport);

    let mut lines: Vec<u16> = (0..head_lines).collect();
    lines.extend(body_start..body_end);
    if view.borders && layout.canvas_height() > head_lines {
        lines.push(layout.canvas_height() - 1);
    }
    lines.truncate(usize::from(area.height));

    let width = layout.width().min(area.width);
    for (offset, line) in lines.iter().enumerate() {
        buf.copy_line(&canvas, *line, area.x, area.y.saturating_add(offset as u16), width);
    }

    let shown = Rect::new(area.x, area.y, width, lines.len() as u16);
    let mut hits = HitMap::new();
    for (section, rect, target) in regions {
        let visible = match section {
            Section::Head => rect.clip_lines(0, head_lines),
            Section::Body => rect
                .clip_lines(body_start, body_end)
                .map(|r| Rect::new(r.x, r.y - scroll, r.width, r.height)),
        };
        if let Some(rect) = visible.and_then(|r| clip_to(r.offset(area.x, area.y), shown)) {
            hits.push(rect, target);
        }
    }
    trace!(
        "painted table {}x{} ({} hit regions, scroll {scroll}/{max_scroll})",
        shown.width,
        shown.height,
        hits.len()
    );

    TableFrame {
        hits,
        area: shown,
        scroll,
        max_scroll,
        viewport,
    }
}

fn clip_to(rect: Rect, bounds: Rect) -> Option<Rect> {
    let x = rect.x.max(bounds.x);
    let y = rect.y.max(bounds.y);
    let right = rect.right().min(bounds.right());
    let bottom = rect.bottom().min(bounds.bottom());
    (x < right && y < bottom).then(|| Rect::new(x, y, right - x, bottom - y))
}

// =============================================================================
// Cells
// =============================================================================

struct CellPainter<'a> {
    canvas: &'a mut Buffer,
    theme: &'a Theme,
    ellipsis: bool,
    focus: Option<&'a str>,
}

impl CellPainter<'_> {
    /// Paint `cell` into `rect`, returning what clicking it means.
    fn paint(&mut self, row: &ViewRow, cell: &ViewCell, rect: Rect) -> Option<Target> {
        let theme = self.theme;
        if matches!(row.kind, RowKind::Data { selected: true, .. }) {
            self.canvas.fill_bg(rect, theme.selected);
        }
        let style = TextStyle::from(&cell.style);

        match &cell.kind {
            CellKind::GroupHeader { label } => {
                self.text(rect, label, cell.align, theme.header, style.bold());
                None
            }
            CellKind::LeafHeader { id, label, sort } => {
                let reserved = if sort.is_some() { SORT_ARROW_WIDTH } else { 0 };
                let label_rect = Rect::new(rect.x, rect.y, rect.width.saturating_sub(reserved), rect.height);
                self.text(label_rect, label, cell.align, theme.header, style.bold());

                let sort = (*sort)?;
                let (arrow, color, arrow_style) = match (sort.active, sort.direction) {
                    (true, Order::Asc) => (SORT_ASCENDING, theme.accent, TextStyle::new()),
                    (true, Order::Desc) => (SORT_DESCENDING, theme.accent, TextStyle::new()),
                    (false, _) => (SORT_ASCENDING, theme.muted, TextStyle::new().dim()),
                };
                if rect.width >= SORT_ARROW_WIDTH {
                    self.canvas.put_str(
                        rect.right() - 1,
                        rect.y,
                        1,
                        &arrow.to_string(),
                        color,
                        arrow_style,
                    );
                }
                Some(Target::SortHeader(id.clone()))
            }
            CellKind::SelectAll {
                checked,
                indeterminate,
            } => {
                let glyph = match (checked, indeterminate) {
                    (true, _) => CHECKED,
                    (false, true) => INDETERMINATE,
                    (false, false) => UNCHECKED,
                };
                let color = if *checked || *indeterminate {
                    theme.accent
                } else {
                    theme.foreground
                };
                self.glyph(rect, glyph, color, TextStyle::new());
                Some(Target::SelectAll)
            }
            CellKind::FilterPlaceholder | CellKind::Blank => None,
            CellKind::FilterInput { column, value } => {
                let line = Rect::new(rect.x, rect.y, rect.width, rect.height.min(1));
                self.canvas.fill_bg(line, theme.surface);
                let focused = self.focus == Some(column.as_str());
                let room = usize::from(rect.width).saturating_sub(usize::from(focused));
                let used = self.canvas.put_str(
                    rect.x,
                    rect.y,
                    rect.width,
                    tail_to_width(value, room),
                    theme.foreground,
                    TextStyle::new(),
                );
                if focused && !line.is_empty() {
                    if let Some(cursor) = self.canvas.get_mut(rect.x.saturating_add(used), rect.y) {
                        cursor.bg = theme.foreground;
                        cursor.fg = theme.surface;
                    }
                }
                Some(Target::FilterInput(column.clone()))
            }
            CellKind::RowCheckbox { key, checked } => match key {
                Some(key) => {
                    let (glyph, color) = if *checked {
                        (CHECKED, theme.accent)
                    } else {
                        (UNCHECKED, theme.foreground)
                    };
                    self.glyph(rect, glyph, color, TextStyle::new());
                    Some(Target::RowCheckbox(key.clone()))
                }
                None => {
                    self.glyph(rect, UNCHECKED, theme.muted, TextStyle::new().dim());
                    None
                }
            },
            CellKind::Data { column, text } => {
                let fg = cell
                    .color
                    .as_deref()
                    .or(cell.style.foreground.as_deref())
                    .and_then(|token| theme.resolve(token))
                    .unwrap_or(theme.foreground);
                self.text(rect, text, cell.align, fg, style);
                match row.kind {
                    RowKind::Data { index, .. } => Some(Target::DataCell {
                        row: index,
                        column: column.clone(),
                    }),
                    _ => None,
                }
            }
            CellKind::Skeleton => {
                let shade = Cell::new(SKELETON).with_fg(theme.muted).with_bg(theme.background);
                self.canvas.fill(rect, shade);
                None
            }
            CellKind::Message(message) => {
                self.text(rect, message, cell.align, theme.muted, style.italic());
                None
            }
        }
    }

    /// Write wrapped or truncated `text` into `rect`, one aligned line per
    /// row of the rect.
    fn text(&mut self, rect: Rect, text: &str, align: Align, fg: Rgb, style: TextStyle) {
        let width = usize::from(rect.width);
        let lines = cell_lines(text, width, self.ellipsis);
        for (i, line) in lines.iter().take(usize::from(rect.height)).enumerate() {
            let offset = align_offset(display_width(line), width, align) as u16;
            self.canvas.put_str(
                rect.x.saturating_add(offset),
                rect.y.saturating_add(i as u16),
                rect.width - offset,
                line,
                fg,
                style,
            );
        }
    }

    fn glyph(&mut self, rect: Rect, glyph: &str, fg: Rgb, style: TextStyle) {
        if rect.is_empty() {
            return;
        }
        let offset = align_offset(display_width(glyph), usize::from(rect.width), Align::Center) as u16;
        self.canvas.put_str(rect.x.saturating_add(offset), rect.y, rect.width - offset, glyph, fg, style);
    }
}

// =============================================================================
// Borders
// =============================================================================

const UP: u8 = 1;
const DOWN: u8 = 2;
const LEFT: u8 = 4;
const RIGHT: u8 = 8;

/// Box-drawing glyph for each combination of line directions.
const GLYPHS: [char; 16] = [
    ' ', '│', '│', '│', '─', '┘', '┐', '┤', '─', '└', '┌', '├', '─', '┴', '┬', '┼',
];

/// Line directions through every canvas cell. Cell outlines are merged here
/// so shared edges of spanned cells get the right junctions.
struct LineMask {
    width: u16,
    height: u16,
    bits: Vec<u8>,
}

impl LineMask {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            bits: vec![0; usize::from(width) * usize::from(height)],
        }
    }

    fn mark(&mut self, x: u16, y: u16, bits: u8) {
        if x < self.width && y < self.height {
            self.bits[usize::from(y) * usize::from(self.width) + usize::from(x)] |= bits;
        }
    }

    fn add_box(&mut self, left: u16, top: u16, right: u16, bottom: u16) {
        for x in left..=right {
            let mut bits = 0;
            if x > left {
                bits |= LEFT;
            }
            if x < right {
                bits |= RIGHT;
            }
            self.mark(x, top, bits);
            self.mark(x, bottom, bits);
        }
        for y in top..=bottom {
            let mut bits = 0;
            if y > top {
                bits |= UP;
            }
            if y < bottom {
                bits |= DOWN;
            }
            self.mark(left, y, bits);
            self.mark(right, y, bits);
        }
    }

    fn draw(&self, canvas: &mut Buffer, color: Rgb) {
        for (i, bits) in self.bits.iter().enumerate() {
            if *bits == 0 {
                continue;
            }
            let x = (i % usize::from(self.width)) as u16;
            let y = (i / usize::from(self.width)) as u16;
            if let Some(cell) = canvas.get_mut(x, y) {
                cell.char = GLYPHS[usize::from(*bits)];
                cell.fg = color;
                cell.style = TextStyle::new();
                cell.wide_continuation = false;
            }
        }
    }
}
