// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, worker updates)
// - Rendering the UI
// - Handing queued commands to the sync worker

pub mod app;
pub mod components;
pub mod layout;
pub mod modal;
pub mod theme;
pub mod views;

use crate::api::HttpBugApi;
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::sync::BugListClient;
use crate::worker::{self, Command, Update, WorkerHandle};
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI until the user quits or the account is deleted
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    // Build the client before touching the terminal so a bad URL prints normally
    let api = HttpBugApi::from_config(&config).context("Cannot create HTTP client")?;
    let (worker, mut updates, worker_task) = worker::spawn(BugListClient::new(api));

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(&config, log_buffer);
    app.submit(Command::Refresh);

    let result = run_event_loop(&mut terminal, &mut app, &worker, &mut updates).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    // A request still in flight has nowhere to report to
    drop(worker);
    worker_task.abort();

    if app.session_ended {
        println!("Account deleted. The session has ended.");
    }

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard input
/// 2. Timer ticks (toast expiry, spinner)
/// 3. Worker updates (model snapshots and outcomes)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &WorkerHandle,
    updates: &mut mpsc::Receiver<Update>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));
    let mut frame: usize = 0;

    loop {
        terminal
            .draw(|f| views::draw(f, app, frame))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                frame = frame.wrapping_add(1);
                app.clear_expired_toast();
            }

            Some(update) = updates.recv() => {
                app.apply_update(update);
            }
        }

        for command in app.take_outbox() {
            let label = command.label();
            if !worker.try_send(command) {
                app.command_dropped(&label);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → Table
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, key_event) {
        return;
    }

    // Layer 2: Global keys
    if handle_global_keys(app, key_event) {
        return;
    }

    // Layer 3: Table keys
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Char('n') => app.open_create(),
        KeyCode::Char('u') | KeyCode::Enter => app.open_edit(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('/') => app.open_search(),
        _ => {}
    }
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: KeyEvent) -> bool {
    let Some(modal) = app.modal.as_mut() else {
        return false;
    };

    match modal.handle_input(key_event) {
        ModalAction::None => {}
        ModalAction::Close => app.close_modal(),
        ModalAction::Submit(command) => {
            app.close_modal();
            app.submit(command);
        }
    }

    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        KeyCode::Char('?') => app.modal = Some(Modal::help()),
        KeyCode::Char('r') => app.submit(Command::Refresh),
        KeyCode::Char('X') => app.modal = Some(Modal::ConfirmDeleteAccount),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::bug;
    use crate::model::{BugForm, BugId, SearchForm};
    use crate::store::BugList;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(&Config::default(), LogBuffer::new());
        app.bugs = BugList::from_server(vec![bug(1, "a"), bug(2, "b")]);
        app
    }

    #[test]
    fn navigation_is_clamped() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 1);
        assert_eq!(app.selected_bug().map(|b| b.id), Some(BugId(2)));
    }

    #[test]
    fn modal_swallows_global_keys() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "quick fix");
        assert!(!app.should_quit);
        assert!(app.take_outbox().is_empty());

        press(&mut app, KeyCode::Enter);
        assert!(app.modal.is_none());
        assert!(matches!(
            app.take_outbox().as_slice(),
            [Command::Create(form)] if *form == BugForm::new("quick fix", "", "", "")
        ));
    }

    #[test]
    fn delete_flow_asks_first() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.modal, Some(Modal::ConfirmDelete { id: BugId(1), .. })));

        // Declined: nothing queued
        press(&mut app, KeyCode::Char('n'));
        assert!(app.modal.is_none());
        assert!(app.take_outbox().is_empty());

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(matches!(
            app.take_outbox().as_slice(),
            [Command::Delete { id: BugId(1), confirmed: true }]
        ));
    }

    #[test]
    fn search_escape_keeps_input() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "crash");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.search_form.keyword, "crash");

        // Reopening resumes it
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Enter);
        assert!(matches!(
            app.take_outbox().as_slice(),
            [Command::Search(form)] if *form == SearchForm::new("crash", "")
        ));
    }

    #[test]
    fn global_keys() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('r'));
        assert!(matches!(app.take_outbox().as_slice(), [Command::Refresh]));

        press(&mut app, KeyCode::Char('X'));
        assert!(matches!(app.modal, Some(Modal::ConfirmDeleteAccount)));
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn edit_without_rows_does_nothing() {
        let mut app = App::new(&Config::default(), LogBuffer::new());
        press(&mut app, KeyCode::Char('u'));
        press(&mut app, KeyCode::Char('d'));
        assert!(app.modal.is_none());
    }
}
