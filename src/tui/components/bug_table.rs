// Bug table component
//
// Built from render::render_bug_table, so the TUI and the headless output
// agree on row content. The actions column names the row controls; they
// are triggered with u/d on the selected row.

use crate::render::{render_bug_table, BugRow, HEADERS};
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use crate::util::single_line;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Column widths: title, description, status, priority, created
const WIDTHS: [Constraint; 5] = [
    Constraint::Min(16),
    Constraint::Min(20),
    Constraint::Length(10),
    Constraint::Length(9),
    Constraint::Length(19),
];

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" Bugs ({}) ", app.bugs.len()));

    if app.bugs.is_empty() {
        let message = if app.loaded {
            "No bugs. Press n to create one."
        } else {
            "Loading…"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let visible = Breakpoint::from_width(area.width).visible_columns();
    let rows = render_bug_table(&app.bugs, &chrono::Local);

    let header_style = Style::default().fg(theme.header).add_modifier(Modifier::BOLD);
    let header = Row::new(
        std::iter::once("ID")
            .chain(select(&HEADERS, &visible))
            .chain(std::iter::once("Actions"))
            .map(|h| Cell::from(h).style(header_style)),
    );

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(5))
        .chain(select(&WIDTHS, &visible))
        .chain(std::iter::once(Constraint::Length(15)))
        .collect();

    let body: Vec<Row> = rows
        .iter()
        .map(|row| table_row(row, &visible, theme))
        .collect();

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

/// Keep the entries whose column is visible
fn select<T: Copy>(items: &[T; 5], visible: &[bool; 5]) -> Vec<T> {
    items
        .iter()
        .zip(visible)
        .filter(|(_, shown)| **shown)
        .map(|(item, _)| *item)
        .collect()
}

fn table_row<'a>(row: &'a BugRow, visible: &[bool; 5], theme: &Theme) -> Row<'a> {
    let [title, description, status, priority, created] = &row.cells;

    let cells = [
        Cell::from(single_line(title)),
        Cell::from(single_line(description)).style(Style::default().fg(theme.muted)),
        Cell::from(status.as_str()).style(theme.status_style(status)),
        Cell::from(priority.as_str()).style(theme.priority_style(priority)),
        Cell::from(created.as_str()).style(Style::default().fg(theme.muted)),
    ];

    let actions = row
        .actions
        .iter()
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join(" │ ");

    let shown = cells
        .into_iter()
        .zip(visible)
        .filter(|(_, shown)| **shown)
        .map(|(cell, _)| cell);

    Row::new(
        std::iter::once(Cell::from(row.id.to_string()))
            .chain(shown)
            .chain(std::iter::once(Cell::from(Line::from(actions)))),
    )
}
