// Colors for the TUI
//
// One palette (One Half Dark). Fields are named for what they paint, not
// for the color they hold.

use crate::logging::LogLevel;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

#[derive(Debug, Clone)]
pub struct Theme {
    // ─── Chrome ──────────────────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub border_type: BorderType,
    pub highlight: Color,
    pub status_bar: Color,

    // ─── Text ────────────────────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // ─── Table ───────────────────────────────────────────────
    pub header: Color,
    pub selection: Color,
    pub selection_fg: Color,

    // ─── Outcomes and log levels ─────────────────────────────
    pub ok: Color,
    pub warn: Color,
    pub error: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Color::Rgb(86, 182, 194),
            border: Color::Rgb(220, 223, 228),
            border_type: BorderType::Rounded,
            highlight: Color::Rgb(229, 192, 123),
            status_bar: Color::Rgb(220, 223, 228),

            background: Color::Rgb(40, 44, 52),
            foreground: Color::Rgb(220, 223, 228),
            muted: Color::Rgb(92, 99, 112),

            header: Color::Rgb(97, 175, 239),
            selection: Color::Rgb(71, 78, 93),
            selection_fg: Color::Rgb(220, 223, 228),

            ok: Color::Rgb(152, 195, 121),
            warn: Color::Rgb(229, 192, 123),
            error: Color::Rgb(224, 108, 117),
            info: Color::Rgb(97, 175, 239),
        }
    }
}

impl Theme {
    /// Style for a log line of the given severity
    pub fn log_style(&self, level: LogLevel) -> Style {
        match level {
            LogLevel::Error => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
            LogLevel::Warn => Style::default().fg(self.warn),
            LogLevel::Info => Style::default().fg(self.info),
            LogLevel::Debug | LogLevel::Trace => Style::default().fg(self.muted),
        }
    }

    /// Status column coloring; unknown statuses stay plain
    pub fn status_style(&self, status: &str) -> Style {
        match status.trim().to_lowercase().as_str() {
            "open" | "new" => Style::default().fg(self.warn),
            "closed" | "resolved" | "done" | "fixed" => Style::default().fg(self.ok),
            _ => Style::default().fg(self.foreground),
        }
    }

    pub fn priority_style(&self, priority: &str) -> Style {
        match priority.trim().to_lowercase().as_str() {
            "high" | "critical" | "urgent" => {
                Style::default().fg(self.error).add_modifier(Modifier::BOLD)
            }
            "medium" => Style::default().fg(self.warn),
            _ => Style::default().fg(self.foreground),
        }
    }
}
