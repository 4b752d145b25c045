use std::cell::{Cell as Shared, RefCell};
use std::fs::{self, File};
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use grouped_table::{
    rows_from_json, Align, ColumnError, ColumnNode, ConfigError, FilterMap, GroupedTable, LeafColumn,
    Row, TableConfig, TableOptions,
};
use grouped_table_term::{
    paint_table, Action, Cell, Rect, TableFrame, TableInput, TermError, Terminal, TextStyle, Theme,
};
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

const LOG_FILE: &str = "grouped-table-demo.log";
const TITLE: &str = "Grouped table";
const HELP: &str = "click to sort/select | Tab filters | l loading | b borders | e ellipsis | q quit";

fn main() {
    match File::create(LOG_FILE) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {e}");
            }
        }
        Err(e) => eprintln!("Failed to create {LOG_FILE}: {e}"),
    }

    if let Err(e) = run() {
        error!("demo failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Usage: `grouped-table-demo [table.json [rows.json]]`.
fn run() -> Result<(), TermError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (columns, options) = match args.first() {
        Some(path) => {
            let config = TableConfig::from_json(&fs::read_to_string(path)?)?;
            (config.column_tree()?, config.options)
        }
        None => (demo_columns().map_err(ConfigError::from)?, demo_options()),
    };
    let dataset = match args.get(1) {
        Some(path) => rows_from_json(&fs::read_to_string(path)?)?,
        None => demo_rows(),
    };

    // The table reports changes; the demo owns the dataset and applies them.
    let pending_filters: Rc<RefCell<Option<FilterMap>>> = Rc::default();
    let selected: Rc<Shared<usize>> = Rc::default();
    let mut table = GroupedTable::new(columns, options)
        .map_err(ConfigError::from)?
        .on_filter_change({
            let pending = pending_filters.clone();
            move |filters| *pending.borrow_mut() = Some(filters.clone())
        })
        .on_selection_change({
            let selected = selected.clone();
            move |keys| selected.set(keys.len())
        });
    table.set_rows(Some(dataset.clone()));
    info!("demo started with {} rows", dataset.len());

    let theme = Theme::new();
    let mut terminal = Terminal::new()?;
    let mut input = TableInput::new();
    let mut loading = false;
    let mut message = String::from(HELP);
    let mut frame = draw(&mut terminal, &table, &input, &theme, &status(&selected, &message))?;

    loop {
        for event in terminal.poll(Duration::from_millis(250))? {
            match input.handle(&mut table, &frame, &event) {
                Action::Quit => return Ok(()),
                Action::Navigate(target) => {
                    info!("navigate to {target}");
                    message = format!("navigate to {target}");
                }
                Action::Redraw => {}
                Action::Ignored => {
                    if let Event::Key(key) = event {
                        if key.kind == KeyEventKind::Press {
                            match key.code {
                                KeyCode::Char('l') => {
                                    loading = !loading;
                                    let rows = visible_rows(&dataset, &table);
                                    table.set_rows((!loading).then_some(rows));
                                }
                                KeyCode::Char('b') => {
                                    let borders = !table.options().enable_borders;
                                    table.set_options(table.options().clone().borders(borders));
                                }
                                KeyCode::Char('e') => {
                                    let ellipsis = !table.options().ellipsis;
                                    table.set_options(table.options().clone().ellipsis(ellipsis));
                                }
                                _ => {}
                            }
                        }
                    }
                }
            }

            let filters = pending_filters.borrow_mut().take();
            if let Some(filters) = filters {
                if !loading {
                    let rows = visible_rows(&dataset, &table);
                    table.set_rows(Some(rows));
                }
                message = format!("{} filter(s) active", filters.len());
            }
        }

        frame = draw(&mut terminal, &table, &input, &theme, &status(&selected, &message))?;
    }
}

fn draw(
    terminal: &mut Terminal,
    table: &GroupedTable,
    input: &TableInput,
    theme: &Theme,
    status: &str,
) -> Result<TableFrame, TermError> {
    let blank = Cell::default().with_fg(theme.foreground).with_bg(theme.background);
    terminal.draw(blank, |buf| {
        let width = buf.width().saturating_sub(2);
        let bottom = buf.height().saturating_sub(1);
        buf.put_str(1, 0, width, TITLE, theme.header, TextStyle::new().bold());
        let area = Rect::new(1, 2, width, buf.height().saturating_sub(4));
        let frame = paint_table(&table.render(), area, input.paint_state(), theme, buf);
        buf.put_str(1, bottom, width, status, theme.muted, TextStyle::new());
        frame
    })
}

fn status(selected: &Shared<usize>, message: &str) -> String {
    format!("{} selected | {message}", selected.get())
}

/// Rows of `dataset` passing the table's current filters.
fn visible_rows(dataset: &[Row], table: &GroupedTable) -> Vec<Row> {
    let leaves = &table.flat().leaf_columns;
    dataset
        .iter()
        .filter(|row| table.filters().matches(row, leaves))
        .cloned()
        .collect()
}

// =============================================================================
// Demo data
// =============================================================================

fn demo_options() -> TableOptions {
    TableOptions::new()
        .sort(true)
        .borders(true)
        .filters(true)
        .checkbox(true)
        .fixed_height(15)
}

fn demo_columns() -> Result<Vec<ColumnNode>, ColumnError> {
    Ok(vec![
        LeafColumn::new("name", "Name")
            .width(16)
            .navigate_to(|row| format!("/people/{}", row.text("id")))
            .into(),
        ColumnNode::group(
            "Other",
            vec![
                LeafColumn::new("age", "Age").width(5).align(Align::Right).into(),
                ColumnNode::group(
                    "Address",
                    vec![
                        LeafColumn::new("street", "Street").min_width(12).into(),
                        ColumnNode::group(
                            "Block",
                            vec![
                                ColumnNode::leaf("building", "Building"),
                                LeafColumn::new("doorNumber", "Door No.").width(8).into(),
                            ],
                        )?,
                    ],
                )?,
            ],
        )?,
        ColumnNode::group(
            "Company",
            vec![
                LeafColumn::new("companyAddress", "Company Address").min_width(10).into(),
                ColumnNode::leaf("companyName", "Company Name"),
            ],
        )?,
        LeafColumn::new("gender", "Gender")
            .width(6)
            .align(Align::Right)
            .color(|row| match row.text("gender").as_str() {
                "F" => Some("purple".to_string()),
                "M" => Some("blue".to_string()),
                _ => None,
            })
            .into(),
    ])
}

fn demo_rows() -> Vec<Row> {
    const NAMES: [&str; 8] = [
        "John Brown",
        "Jim Green",
        "Joe Black",
        "Ada Byron",
        "Grace Hopper",
        "Alan Turing",
        "Edsger Dijkstra",
        "Barbara Liskov",
    ];
    const STREETS: [&str; 5] = [
        "Lake Park",
        "Sidney No. 1 Lake Park",
        "Baker Street",
        "Elm Row",
        "Harbour View",
    ];
    const COMPANIES: [(&str, &str); 4] = [
        ("Lake Street 42", "SoftLake Co"),
        ("Dock Road 7", "Harbour Labs"),
        ("Mill Lane 3", "Grain Systems"),
        ("Quay 19", "Tidewater Ltd"),
    ];

    (0..40)
        .map(|i: usize| {
            let (address, company) = COMPANIES[i % COMPANIES.len()];
            Row::new()
                .set("id", i as i64 + 1)
                .set("name", NAMES[i % NAMES.len()])
                .set("age", 20 + (i * 7 % 45) as i64)
                .set("street", STREETS[i % STREETS.len()])
                .set("building", ["A", "B", "C"][i % 3])
                .set("doorNumber", (2000 + i * 13).to_string())
                .set("companyAddress", address)
                .set("companyName", company)
                .set("gender", if i % 3 == 0 { "F" } else { "M" })
        })
        .collect()
}
