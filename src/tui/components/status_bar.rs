// Status bar component
//
// Bug count, pending operations, last error, and key hints.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
///
/// Adapts to terminal width:
/// - Wide: counts, last error, full key hints
/// - Narrow: counts and a short hint
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let bp = Breakpoint::from_width(area.width);

    let counts = if app.pending > 0 {
        format!(" {} bugs │ ⏳ {} pending", app.bugs.len(), app.pending)
    } else {
        format!(" {} bugs", app.bugs.len())
    };

    let mut spans = vec![Span::styled(counts, Style::default().fg(theme.status_bar))];

    if bp.at_least(Breakpoint::Wide) {
        if let Some(entry) = app.log_buffer.last_error() {
            let local = entry.timestamp.with_timezone(&chrono::Local);
            spans.push(Span::styled(
                format!(
                    " │ ✗ {} {}",
                    local.format("%H:%M:%S"),
                    truncate_to_width(&entry.message, 48)
                ),
                Style::default().fg(theme.error),
            ));
        }
    }

    let hints = if bp.at_least(Breakpoint::Normal) {
        " │ n new  u update  d delete  / search  r refresh  q quit"
    } else {
        " │ ? keys"
    };
    spans.push(Span::styled(hints, Style::default().fg(theme.muted)));

    let status = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}
