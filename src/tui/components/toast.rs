//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after two seconds.
//! Renders in the bottom-right corner on top of all other content.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const TOAST_DURATION: Duration = Duration::from_secs(2);

/// A toast notification that auto-dismisses
#[derive(Debug)]
pub struct Toast {
    pub message: String,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }

    /// Render the toast in the bottom-right corner, above the status bar
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // 2 cells padding + 2 border
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height).intersection(area);

        let color = if self.message.starts_with('✗') {
            theme.error
        } else {
            theme.highlight
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        // Clear the area first so toast appears on top
        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn fresh_toast_is_not_expired() {
        assert!(!Toast::new("✓ Create").is_expired());
    }

    #[test]
    fn old_toast_expires() {
        let toast = Toast {
            message: "x".to_string(),
            created_at: Instant::now() - TOAST_DURATION,
        };
        assert!(toast.is_expired());
    }

    #[test]
    fn stays_inside_short_frames() {
        let toast = Toast::new("✗ Create: Network error");
        for height in 1..6 {
            let mut terminal = Terminal::new(TestBackend::new(30, height)).unwrap();
            terminal
                .draw(|f| toast.render(f, f.area(), &Theme::default()))
                .unwrap();
        }
    }

    #[test]
    fn sits_above_the_status_bar() {
        let toast = Toast::new("✓ Create");
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|f| toast.render(f, f.area(), &Theme::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String { (0..40).map(|x| buffer[(x, y)].symbol()).collect() };
        assert!(row(6).contains("✓ Create"));
        assert!(!row(9).contains("Create"));
    }
}
