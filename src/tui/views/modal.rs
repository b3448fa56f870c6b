// Modal overlay rendering
//
// Modals are rendered on top of the main content:
// - Help: keyboard shortcuts and current config
// - Bug form: four labelled fields, focused one highlighted
// - Search: keyword and category fields
// - Confirmations: delete bug, delete account

use crate::model::{BUG_FORM_FIELDS, SEARCH_CATEGORIES};
use crate::tui::app::App;
use crate::tui::modal::{BugFormState, FormMode, Modal, SearchState};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::BugForm(state) => render_bug_form(f, state, &app.theme),
        Modal::Search(state) => render_search(f, state, &app.theme),
        Modal::ConfirmDelete { id, title } => render_confirm(
            f,
            &app.theme,
            " Delete bug ",
            vec![
                Line::raw(format!("Are you sure you want to delete bug {}?", id)),
                Line::styled(format!("“{}”", title), Style::default().fg(app.theme.muted)),
            ],
        ),
        Modal::ConfirmDeleteAccount => render_confirm(
            f,
            &app.theme,
            " Delete account ",
            vec![
                Line::raw("Are you sure you want to delete your account?"),
                Line::styled(
                    "This cannot be undone. The session ends afterwards.",
                    Style::default().fg(app.theme.error),
                ),
            ],
        ),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn modal_block<'a>(theme: &Theme, title: &'a str, hint: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .border_type(theme.border_type)
        .title(title)
        .title_bottom(Line::from(hint).centered())
}

/// A `label: value▏` line, highlighted when focused
fn field_line<'a>(theme: &Theme, label: &str, value: &str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    let cursor = if focused { "▏" } else { "" };
    Line::from(vec![
        Span::styled(format!("  {:<12}", format!("{}:", label)), label_style),
        Span::styled(format!("{}{}", value, cursor), Style::default().fg(theme.foreground)),
    ])
}

/// Render the help modal overlay
fn render_help(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let key_style = Style::default().fg(theme.header);
    let desc_style = Style::default().fg(theme.foreground);
    let header_style = Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD);

    // Helper to create a keybind line: "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Table", header_style)),
        kb("↑/↓, j/k", "Select bug"),
        kb("Home/End", "First / last bug"),
        kb("n", "New bug"),
        kb("u, Enter", "Update selected bug"),
        kb("d", "Delete selected bug"),
        kb("/", "Search"),
        kb("r", "Refresh from server"),
        Line::raw(""),
        Line::from(Span::styled("  Forms", header_style)),
        kb("Tab/↓", "Next field"),
        kb("Shift+Tab/↑", "Previous field"),
        kb("Ctrl+N", "Cycle search category"),
        kb("Enter", "Submit"),
        kb("Esc", "Close (keeps input)"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("X", "Delete account"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Server: ", desc_style),
            Span::styled(app.server_url.as_str(), key_style),
        ]),
        Line::from(vec![
            Span::styled("  Confirm deletes: ", desc_style),
            Span::styled(if app.confirm_delete { "on" } else { "off" }, key_style),
        ]),
    ]);

    let area = centered_rect(48, 27, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(theme.background))
        .block(modal_block(theme, " Help ", " Press ? or Esc to close "));

    f.render_widget(paragraph, area);
}

fn render_bug_form(f: &mut Frame, state: &BugFormState, theme: &Theme) {
    let title = match state.mode {
        FormMode::Create => " New bug ".to_string(),
        FormMode::Edit(id) => format!(" Update bug {} ", id),
    };

    let mut lines = vec![Line::raw("")];
    for (i, (name, value)) in BUG_FORM_FIELDS.iter().zip(&state.values).enumerate() {
        lines.push(field_line(theme, name, value, i == state.focus));
    }
    if let FormMode::Edit(_) = state.mode {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "  All four fields are required.",
            Style::default().fg(theme.muted),
        ));
    }

    let width = (f.area().width * 70 / 100).clamp(40, 90);
    let area = centered_rect(width, lines.len() as u16 + 3, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(theme.background))
        .block(modal_block(theme, &title, " Enter submit · Tab next · Esc close "));
    f.render_widget(paragraph, area);
}

fn render_search(f: &mut Frame, state: &SearchState, theme: &Theme) {
    let lines = vec![
        Line::raw(""),
        field_line(theme, "keyword", &state.form.keyword, state.focus == 0),
        field_line(theme, "category", &state.form.category, state.focus == 1),
        Line::raw(""),
        Line::styled(
            format!("  Categories: {}", SEARCH_CATEGORIES.join(", ")),
            Style::default().fg(theme.muted),
        ),
    ];

    let area = centered_rect(60, lines.len() as u16 + 3, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(theme.background))
        .block(modal_block(theme, " Search ", " Enter search · Ctrl+N category · Esc close "));
    f.render_widget(paragraph, area);
}

fn render_confirm(f: &mut Frame, theme: &Theme, title: &str, mut lines: Vec<Line>) {
    lines.insert(0, Line::raw(""));
    lines.push(Line::raw(""));

    let area = centered_rect(56, lines.len() as u16 + 2, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(theme.foreground).bg(theme.background))
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center)
        .block(modal_block(theme, title, " y confirm · n cancel "));
    f.render_widget(paragraph, area);
}
