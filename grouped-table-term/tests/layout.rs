use grouped_table::{ColumnNode, GroupedTable, LeafColumn, Row, TableOptions};
use grouped_table_term::layout::{Placement, Section, TableLayout};
use grouped_table_term::{paint_table, Buffer, PaintState, Rect, Theme};

fn name_age(options: TableOptions, rows: usize) -> GroupedTable {
    let columns = vec![
        ColumnNode::leaf("name", "Name"),
        ColumnNode::group("Other", vec![ColumnNode::leaf("age", "Age")]).unwrap(),
    ];
    let mut table = GroupedTable::new(columns, options).unwrap();
    table.set_rows(Some(
        (0..rows as i64)
            .map(|i| Row::new().set("id", i).set("name", format!("P{i}")).set("age", 20 + i))
            .collect(),
    ));
    table
}

fn find(layout: &TableLayout, section: Section, row: usize, col: usize) -> Placement {
    *layout
        .section(section)
        .placements
        .iter()
        .find(|p| p.row == row && p.col == col)
        .unwrap()
}

#[test]
fn test_bordered_geometry() {
    let table = name_age(TableOptions::new().borders(true), 2);
    let layout = TableLayout::compute(&table.render(), 21);

    assert_eq!(layout.widths, vec![9, 9]);
    assert_eq!(layout.xs, vec![0, 10, 20]);
    assert_eq!(layout.width(), 21);

    assert_eq!(layout.head.heights, vec![1, 1]);
    assert_eq!(layout.head.ys, vec![0, 2, 4]);
    assert_eq!(layout.head.total(true), 5);
    assert_eq!(layout.body_origin(), 4);
    assert_eq!(layout.body_lines(), 3);
    assert_eq!(layout.canvas_height(), 9);

    let name = layout.cell_box(Section::Head, &find(&layout, Section::Head, 0, 0));
    assert_eq!((name.left, name.top, name.right, name.bottom), (0, 0, 10, 4));
    assert_eq!(name.content, Rect::new(1, 1, 9, 3));

    let age = layout.cell_box(Section::Head, &find(&layout, Section::Head, 1, 1));
    assert_eq!(age.content, Rect::new(11, 3, 9, 1));

    let first = layout.cell_box(Section::Body, &find(&layout, Section::Body, 0, 0));
    assert_eq!(first.content, Rect::new(1, 5, 9, 1));
}

#[test]
fn test_borderless_geometry() {
    let table = name_age(TableOptions::new(), 3);
    let layout = TableLayout::compute(&table.render(), 21);

    assert_eq!(layout.widths, vec![10, 10]);
    assert_eq!(layout.width(), 21);
    assert_eq!(layout.head.ys, vec![0, 1, 2]);
    assert_eq!(layout.body_origin(), 2);
    assert_eq!(layout.body_lines(), 3);

    let age = layout.cell_box(Section::Head, &find(&layout, Section::Head, 1, 1));
    assert_eq!(age.content, Rect::new(11, 1, 10, 1));
    assert_eq!(age.right, 21);
}

#[test]
fn test_spanning_header_grows_last_row() {
    let columns = vec![
        LeafColumn::new("name", "Name is long").width(4).into(),
        ColumnNode::group("G", vec![ColumnNode::leaf("a", "A")]).unwrap(),
    ];
    let table = GroupedTable::new(columns, TableOptions::new()).unwrap();
    let layout = TableLayout::compute(&table.render(), 12);
    assert_eq!(layout.head.heights, vec![1, 2]);
    assert_eq!(layout.head.ys, vec![0, 1, 3]);

    let mut table = table;
    table.set_options(TableOptions::new().ellipsis(true));
    let layout = TableLayout::compute(&table.render(), 12);
    assert_eq!(layout.head.heights, vec![1, 1]);
}

#[test]
fn test_wrapped_body_rows() {
    let columns = vec![ColumnNode::leaf("street", "Street")];
    let mut table = GroupedTable::new(columns, TableOptions::new()).unwrap();
    table.set_rows(Some(vec![
        Row::new().set("street", "Sidney No. 1 Lake Park"),
        Row::new().set("street", "Elm"),
    ]));

    let layout = TableLayout::compute(&table.render(), 10);
    assert_eq!(layout.body.heights, vec![3, 1]);
    assert_eq!(layout.body_lines(), 4);

    table.set_options(TableOptions::new().ellipsis(true));
    let layout = TableLayout::compute(&table.render(), 10);
    assert_eq!(layout.body.heights, vec![1, 1]);
}

#[test]
fn test_viewport_and_scroll_range() {
    let table = name_age(TableOptions::new(), 5);
    let layout = TableLayout::compute(&table.render(), 20);

    assert_eq!(layout.viewport(None), 5);
    assert_eq!(layout.max_scroll(None), 0);
    assert_eq!(layout.viewport(Some(2)), 2);
    assert_eq!(layout.max_scroll(Some(2)), 3);
    assert_eq!(layout.viewport(Some(10)), 5);
    assert_eq!(layout.max_scroll(Some(10)), 0);
}

#[test]
fn test_selection_column_is_fixed() {
    let table = name_age(TableOptions::new().checkbox(true).borders(true), 1);
    let layout = TableLayout::compute(&table.render(), 30);
    // 30 wide, 4 separator columns: 3 for the checkbox, 23 shared.
    assert_eq!(layout.widths, vec![3, 12, 11]);
    assert_eq!(layout.width(), 30);
}

#[test]
fn test_widest_column_saturates() {
    let columns = vec![
        LeafColumn::new("a", "A").width(u16::MAX).into(),
        ColumnNode::leaf("b", "B"),
    ];
    let mut table = GroupedTable::new(columns, TableOptions::new()).unwrap();
    table.set_rows(Some(vec![Row::new().set("a", "x").set("b", "y")]));
    let view = table.render();

    let layout = TableLayout::compute(&view, 80);
    assert_eq!(layout.widths, vec![u16::MAX, 4]);
    assert_eq!(layout.xs, vec![0, u16::MAX, u16::MAX]);
    assert_eq!(layout.head.heights, vec![1]);
    assert_eq!(layout.body.heights, vec![1]);

    let clipped = layout.cell_box(Section::Head, &find(&layout, Section::Head, 0, 1));
    assert!(clipped.content.is_empty());

    let mut buf = Buffer::new(80, 4);
    let frame = paint_table(&view, buf.area(), PaintState::default(), &Theme::new(), &mut buf);
    assert_eq!(frame.area, Rect::new(0, 0, 80, 2));
    assert_eq!(buf.line(0), format!("A{}", " ".repeat(79)));
    assert_eq!(buf.line(1), format!("x{}", " ".repeat(79)));
}

#[test]
fn test_duplicate_header_leaves_do_not_widen_grid() {
    let columns = vec![
        ColumnNode::leaf("name", "Name"),
        ColumnNode::group("Again", vec![ColumnNode::leaf("name", "Name")]).unwrap(),
    ];
    let table = GroupedTable::new(columns, TableOptions::new()).unwrap();
    let layout = TableLayout::compute(&table.render(), 20);

    assert_eq!(layout.widths, vec![20]);
    let placed: Vec<(usize, usize)> = layout.head.placements.iter().map(|p| (p.row, p.col)).collect();
    assert_eq!(placed, vec![(0, 0)]);
}
