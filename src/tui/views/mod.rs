// Views module - screen-level rendering
//
// One screen: title bar, bug table, diagnostics panel, status bar, with
// modal and toast overlays on top.

mod modal;

use super::app::App;
use crate::tui::components;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Rows given to the diagnostics panel (including borders)
const DIAGNOSTICS_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App, frame: usize) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(DIAGNOSTICS_HEIGHT),
            Constraint::Length(2),
        ])
        .split(f.area());

    components::title_bar::render(f, chunks[0], app, frame);
    components::bug_table::render(f, chunks[1], app);
    components::logs_panel::render(f, chunks[2], app);
    components::status_bar::render(f, chunks[3], app);

    // Modal overlay (on top of everything)
    if let Some(modal_state) = &app.modal {
        modal::render(f, modal_state, app);
    }

    // Toast on top of modal too
    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use crate::model::tests::bug;
    use crate::store::BugList;
    use crate::tui::modal::Modal;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app, 0)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draws_rows_and_actions() {
        let mut app = App::new(&Config::default(), LogBuffer::new());
        app.bugs = BugList::from_server(vec![bug(1, "Crash on save"), bug(2, "Typo")]);
        app.loaded = true;

        let text = screen(&app, 120, 30);
        assert!(text.contains("Crash on save"));
        assert!(text.contains("Typo"));
        assert!(text.contains("Update │ Delete"));
        assert!(text.contains("Diagnostics"));
    }

    #[test]
    fn draws_empty_state_and_modal() {
        let mut app = App::new(&Config::default(), LogBuffer::new());
        app.loaded = true;
        app.modal = Some(Modal::ConfirmDeleteAccount);

        let text = screen(&app, 100, 30);
        assert!(text.contains("No bugs"));
        assert!(text.contains("Delete account"));
    }

    #[test]
    fn small_terminal_does_not_panic() {
        let mut app = App::new(&Config::default(), LogBuffer::new());
        app.bugs = BugList::from_server(vec![bug(1, "x")]);
        app.open_create();
        app.show_toast("✓ Create");
        screen(&app, 20, 8);
    }
}
