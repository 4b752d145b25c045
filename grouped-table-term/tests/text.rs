use grouped_table::Align;
use grouped_table_term::text::{
    align_offset, cell_lines, char_width, display_width, tail_to_width, truncate_to_width, wrap,
    wrap_chars,
};

#[test]
fn test_display_width() {
    assert_eq!(display_width("hello"), 5);
    assert_eq!(display_width(""), 0);
    assert_eq!(display_width("日本語"), 6);
    assert_eq!(display_width("a日b"), 4);
}

#[test]
fn test_char_width() {
    assert_eq!(char_width('a'), 1);
    assert_eq!(char_width('日'), 2);
    assert_eq!(char_width('▲'), 1);
}

#[test]
fn test_truncate() {
    assert_eq!(truncate_to_width("Street", 10), "Street");
    assert_eq!(truncate_to_width("Company Address", 8), "Company…");
    assert_eq!(truncate_to_width("Door No.", 1), "…");
    assert_eq!(truncate_to_width("Door No.", 0), "");
}

#[test]
fn test_truncate_wide_chars() {
    assert_eq!(truncate_to_width("日本語", 5), "日本…");
    assert_eq!(truncate_to_width("日本語", 4), "日…");
}

#[test]
fn test_tail_keeps_end_of_input() {
    assert_eq!(tail_to_width("Baker Street", 6), "Street");
    assert_eq!(tail_to_width("abc", 10), "abc");
    assert_eq!(tail_to_width("日本語", 3), "語");
    assert_eq!(tail_to_width("abc", 0), "");
}

#[test]
fn test_wrap_on_words() {
    assert_eq!(wrap("hello world", 20), vec!["hello world"]);
    assert_eq!(wrap("hello world foo bar", 11), vec!["hello world", "foo bar"]);
    assert_eq!(wrap("Company Address", 8), vec!["Company", "Address"]);
}

#[test]
fn test_wrap_long_word() {
    assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    assert_eq!(wrap("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
}

#[test]
fn test_wrap_edge_cases() {
    assert_eq!(wrap("", 5), vec![""]);
    assert_eq!(wrap("a\nb", 5), vec!["a", "b"]);
    assert!(wrap("anything", 0).is_empty());
}

#[test]
fn test_wrap_chars() {
    assert_eq!(wrap_chars("Door No.", 3), vec!["Doo", "r N", "o."]);
    assert_eq!(wrap_chars("日本語", 4), vec!["日本", "語"]);
}

#[test]
fn test_cell_lines() {
    assert_eq!(cell_lines("Lake Street 42", 8, true), vec!["Lake St…"]);
    assert_eq!(cell_lines("two\nlines", 20, true), vec!["two lines"]);
    assert_eq!(cell_lines("Lake Street 42", 8, false), vec!["Lake", "Street", "42"]);
}

#[test]
fn test_align_offset() {
    assert_eq!(align_offset(3, 10, Align::Left), 0);
    assert_eq!(align_offset(3, 10, Align::Center), 3);
    assert_eq!(align_offset(3, 10, Align::Right), 7);
    assert_eq!(align_offset(12, 10, Align::Right), 0);
}
