//! Diagnostics panel
//!
//! Tails the in-memory log buffer. Failed backend calls land here (they are
//! logged at error level by the sync client), so this is where the user
//! sees why something did not happen.

use crate::logging::LogEntry;
use crate::tui::app::App;
use crate::util::single_line;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// One display line: local time, level, message, emitting module
pub fn format_log_entry(entry: &LogEntry) -> String {
    let module = entry.target.rsplit("::").next().unwrap_or_default();
    format!(
        "{} {:<5} {} [{}]",
        entry.timestamp.with_timezone(&chrono::Local).format("%H:%M:%S"),
        entry.level.as_str(),
        single_line(&entry.message),
        module
    )
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    // Borders take two rows
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(Span::styled(
                format_log_entry(entry),
                theme.log_style(entry.level),
            )))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" Diagnostics ({}) ", app.log_buffer.len())),
    );

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use chrono::Utc;

    #[test]
    fn entry_is_one_line() {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Error,
            target: "bugdesk::sync".to_string(),
            message: "Error creating bug: Server error (400):\nMissing data".to_string(),
        };
        let line = format_log_entry(&entry);
        assert!(!line.contains('\n'));
        assert!(line.contains("ERROR Error creating bug"));
        assert!(line.ends_with("[sync]"));
    }
}
