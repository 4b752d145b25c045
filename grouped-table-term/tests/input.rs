use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use grouped_table::{ColumnNode, GroupedTable, LeafColumn, Order, Row, TableOptions};
use grouped_table_term::{paint_table, Action, Buffer, TableFrame, TableInput, Target, Theme};

fn table(options: TableOptions) -> GroupedTable {
    let columns = vec![
        ColumnNode::Leaf(
            LeafColumn::new("name", "Name").navigate_to(|row| format!("/people/{}", row.text("id"))),
        ),
        ColumnNode::group("Other", vec![ColumnNode::leaf("age", "Age")]).unwrap(),
    ];
    let mut table = GroupedTable::new(columns, options).unwrap();
    table.set_rows(Some(
        (1..=8)
            .map(|i: i64| Row::new().set("id", i).set("name", format!("P{i}")).set("age", 50 - i))
            .collect(),
    ));
    table
}

fn frame(table: &GroupedTable, input: &TableInput) -> TableFrame {
    let mut buf = Buffer::new(30, 20);
    paint_table(&table.render(), buf.area(), input.paint_state(), &Theme::new(), &mut buf)
}

fn click_on(frame: &TableFrame, target: &Target) -> Event {
    let rect = frame.hits.find(target).unwrap();
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: rect.x,
        row: rect.y,
        modifiers: KeyModifiers::NONE,
    })
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn test_click_header_sorts() {
    let mut table = table(TableOptions::new().sort(true));
    let mut input = TableInput::new();

    let f = frame(&table, &input);
    let action = input.handle(&mut table, &f, &click_on(&f, &Target::SortHeader("age".into())));
    assert_eq!(action, Action::Redraw);
    assert_eq!(table.sort().key.as_deref(), Some("age"));
    assert_eq!(table.rows().unwrap()[0].text("name"), "P8");

    let f = frame(&table, &input);
    input.handle(&mut table, &f, &click_on(&f, &Target::SortHeader("age".into())));
    assert_eq!(table.sort().order, Order::Desc);
    assert_eq!(table.rows().unwrap()[0].text("name"), "P1");
}

#[test]
fn test_click_checkboxes() {
    let mut table = table(TableOptions::new().checkbox(true));
    let mut input = TableInput::new();

    let f = frame(&table, &input);
    input.handle(&mut table, &f, &click_on(&f, &Target::RowCheckbox("3".into())));
    assert_eq!(table.selection().keys(), ["3"]);

    let f = frame(&table, &input);
    input.handle(&mut table, &f, &click_on(&f, &Target::SelectAll));
    assert_eq!(table.selection().len(), 8);

    let f = frame(&table, &input);
    input.handle(&mut table, &f, &click_on(&f, &Target::SelectAll));
    assert!(table.selection().is_empty());

    let f = frame(&table, &input);
    let cell = Target::DataCell {
        row: 4,
        column: "age".into(),
    };
    input.handle(&mut table, &f, &click_on(&f, &cell));
    assert_eq!(table.selection().keys(), ["5"]);
}

#[test]
fn test_click_data_cell_navigates() {
    let mut table = table(TableOptions::new());
    let mut input = TableInput::new();

    let f = frame(&table, &input);
    let cell = Target::DataCell {
        row: 1,
        column: "name".into(),
    };
    let action = input.handle(&mut table, &f, &click_on(&f, &cell));
    assert_eq!(action, Action::Navigate("/people/2".into()));
}

#[test]
fn test_typing_into_filter() {
    let mut table = table(TableOptions::new().filters(true));
    let mut input = TableInput::new();

    let f = frame(&table, &input);
    input.handle(&mut table, &f, &click_on(&f, &Target::FilterInput("name".into())));
    assert_eq!(input.focus(), Some("name"));

    input.handle(&mut table, &f, &key(KeyCode::Char('P')));
    input.handle(&mut table, &f, &key(KeyCode::Char('3')));
    assert_eq!(table.filters().get("name"), Some("P3"));

    input.handle(&mut table, &f, &key(KeyCode::Backspace));
    input.handle(&mut table, &f, &key(KeyCode::Backspace));
    assert_eq!(table.filters().get("name"), None);
    assert!(table.filters().is_empty());

    // Keys go to the filter while it has focus.
    assert_eq!(input.handle(&mut table, &f, &key(KeyCode::Char('q'))), Action::Redraw);
    assert_eq!(table.filters().get("name"), Some("q"));

    input.handle(&mut table, &f, &key(KeyCode::Tab));
    assert_eq!(input.focus(), Some("age"));
    input.handle(&mut table, &f, &key(KeyCode::Tab));
    assert_eq!(input.focus(), Some("name"));

    input.handle(&mut table, &f, &key(KeyCode::Esc));
    assert_eq!(input.focus(), None);
    assert_eq!(input.handle(&mut table, &f, &key(KeyCode::Char('q'))), Action::Quit);
}

#[test]
fn test_scrolling_is_clamped() {
    let mut table = table(TableOptions::new().fixed_height(3));
    let mut input = TableInput::new();

    let f = frame(&table, &input);
    assert_eq!(f.max_scroll, 5);
    assert_eq!(input.handle(&mut table, &f, &key(KeyCode::Up)), Action::Ignored);

    assert_eq!(input.handle(&mut table, &f, &key(KeyCode::PageDown)), Action::Redraw);
    assert_eq!(input.scroll(), 3);

    let f = frame(&table, &input);
    input.handle(&mut table, &f, &key(KeyCode::PageDown));
    assert_eq!(input.scroll(), 5);

    let f = frame(&table, &input);
    assert_eq!(f.scroll, 5);
    assert_eq!(input.handle(&mut table, &f, &key(KeyCode::Down)), Action::Ignored);
    input.handle(&mut table, &f, &key(KeyCode::Home));
    assert_eq!(input.scroll(), 0);
}

#[test]
fn test_click_outside_clears_focus() {
    let mut table = table(TableOptions::new().filters(true));
    let mut input = TableInput::new();

    let f = frame(&table, &input);
    input.handle(&mut table, &f, &click_on(&f, &Target::FilterInput("age".into())));
    assert_eq!(input.focus(), Some("age"));

    let outside = Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 29,
        row: 19,
        modifiers: KeyModifiers::NONE,
    });
    input.handle(&mut table, &f, &outside);
    assert_eq!(input.focus(), None);
}
