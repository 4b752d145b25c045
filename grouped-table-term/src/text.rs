//! Display-width aware text measurement, truncation and wrapping.

use grouped_table::Align;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ELLIPSIS: char = '…';

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Cut `s` to `max_width` cells, ending in an ellipsis when anything was cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = char_width(ch);
        if width + w > budget {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push(ELLIPSIS);
    out
}

/// The longest suffix of `s` at most `max_width` cells wide.
pub fn tail_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = s.len();
    for (index, ch) in s.char_indices().rev() {
        let w = char_width(ch);
        if width + w > max_width {
            break;
        }
        width += w;
        start = index;
    }
    &s[start..]
}

/// Break `s` into lines of at most `max_width` cells at character
/// boundaries. Always yields at least one line for a non-zero width.
pub fn wrap_chars(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in s.split('\n') {
        let mut line = String::new();
        let mut width = 0;
        for ch in paragraph.chars() {
            let w = char_width(ch);
            if width + w > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                width = 0;
            }
            line.push(ch);
            width += w;
        }
        lines.push(line);
    }
    lines
}

/// Break `s` into lines of at most `max_width` cells, preferring word
/// boundaries. Words wider than a line are split by character.
pub fn wrap(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in s.split('\n') {
        let mut line = String::new();
        let mut width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);
            let gap = usize::from(!line.is_empty());
            if width + gap + word_width <= max_width {
                if gap == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                width += gap + word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                width = 0;
            }
            if word_width <= max_width {
                line.push_str(word);
                width = word_width;
            } else {
                let mut pieces = wrap_chars(word, max_width);
                if let Some(last) = pieces.pop() {
                    lines.extend(pieces);
                    width = display_width(&last);
                    line = last;
                }
            }
        }
        lines.push(line);
    }
    lines
}

/// Lines of cell text for a column `width` cells wide: a single truncated
/// line with `ellipsis`, word-wrapped lines otherwise.
pub fn cell_lines(text: &str, width: usize, ellipsis: bool) -> Vec<String> {
    if ellipsis {
        vec![truncate_to_width(&text.replace('\n', " "), width)]
    } else {
        wrap(text, width)
    }
}

/// Column offset of text `text_width` cells wide inside `available` cells.
pub fn align_offset(text_width: usize, available: usize, align: Align) -> usize {
    let spare = available.saturating_sub(text_width);
    match align {
        Align::Left => 0,
        Align::Center => spare / 2,
        Align::Right => spare,
    }
}
