// Title bar component
//
// App name, backend address, and a spinner while commands are in flight.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

pub fn render(f: &mut Frame, area: Rect, app: &App, frame: usize) {
    let theme = &app.theme;

    let mut spans = vec![
        Span::styled(
            " 🐞 bugdesk",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", app.server_url), Style::default().fg(theme.muted)),
    ];
    if app.pending > 0 {
        spans.push(Span::styled(
            format!("  {} working", SPINNER[frame % SPINNER.len()]),
            Style::default().fg(theme.highlight),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.title))
            .title_top(Line::from(" ? help ").right_aligned()),
    );

    f.render_widget(title, area);
}
