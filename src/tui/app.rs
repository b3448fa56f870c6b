// TUI application state
//
// The App holds a snapshot of the bug list as last reported by the worker,
// the row selection, the open modal, and the two persistent forms. It never
// calls the backend: actions are queued in `outbox` and the event loop hands
// them to the worker.

use super::components::Toast;
use super::modal::{FormMode, Modal};
use super::theme::Theme;
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::model::{Bug, BugForm, SearchForm};
use crate::render::{render_row, RowAction};
use crate::store::BugList;
use crate::sync::Outcome;
use crate::util::truncate_to_width;
use crate::worker::{Command, CommandKind, ReturnedForm, Update};

/// Longest toast text before truncation
const TOAST_WIDTH: usize = 60;

/// Main application state for the TUI
pub struct App {
    /// Bugs in table order, as of the last worker update
    pub bugs: BugList,

    /// Index of the selected row
    pub selected: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Set once the account is gone; no further commands make sense
    pub session_ended: bool,

    /// Active modal overlay (captures all input when Some)
    pub modal: Option<Modal>,

    /// Transient notification
    pub toast: Option<Toast>,

    /// Diagnostics captured from tracing
    pub log_buffer: LogBuffer,

    /// Commands queued but not yet reported back
    pub pending: usize,

    /// Commands waiting to be handed to the worker
    outbox: Vec<Command>,

    /// Create form contents; cleared only after a successful create
    pub create_form: BugForm,

    /// Search form contents; cleared only after a successful search
    pub search_form: SearchForm,

    pub confirm_delete: bool,
    pub server_url: String,
    pub theme: Theme,

    /// Whether the first list load has come back
    pub loaded: bool,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer) -> Self {
        Self {
            bugs: BugList::new(),
            selected: 0,
            should_quit: false,
            session_ended: false,
            modal: None,
            toast: None,
            log_buffer,
            pending: 0,
            outbox: Vec::new(),
            create_form: BugForm::default(),
            search_form: SearchForm::default(),
            confirm_delete: config.confirm_delete,
            server_url: config.server_url.clone(),
            theme: Theme::default(),
            loaded: false,
        }
    }

    // ─── Selection ───────────────────────────────────────────

    pub fn selected_bug(&self) -> Option<&Bug> {
        self.bugs.as_slice().get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.bugs.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.bugs.len().saturating_sub(1);
    }

    // ─── Commands ────────────────────────────────────────────

    /// Queue a command for the worker
    pub fn submit(&mut self, command: Command) {
        if self.session_ended {
            self.show_toast("Session ended; restart to log in again");
            return;
        }
        tracing::debug!("Queued {}", command.label());
        self.pending += 1;
        self.outbox.push(command);
    }

    /// Drain queued commands for delivery
    pub fn take_outbox(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    /// The worker refused a command (queue full or stopped)
    pub fn command_dropped(&mut self, label: &str) {
        self.pending = self.pending.saturating_sub(1);
        self.show_toast(format!("✗ {}: worker unavailable", label));
    }

    // ─── Modals ──────────────────────────────────────────────

    pub fn open_create(&mut self) {
        self.modal = Some(Modal::create(&self.create_form));
    }

    /// Controls of the selected row, bound to its id when rendered
    fn selected_actions(&self) -> Option<[RowAction; 2]> {
        self.selected_bug()
            .map(|bug| render_row(bug, &chrono::Local).actions)
    }

    /// Press the selected row's Update control
    pub fn open_edit(&mut self) {
        if let Some([update, _]) = self.selected_actions() {
            self.run_row_action(update);
        }
    }

    /// Press the selected row's Delete control
    pub fn request_delete(&mut self) {
        if let Some([_, delete]) = self.selected_actions() {
            self.run_row_action(delete);
        }
    }

    /// Act on a row control for the bug it was bound to.
    ///
    /// Delete asks first unless confirmations are off. A control whose bug
    /// has since left the table does nothing.
    pub fn run_row_action(&mut self, action: RowAction) {
        let id = action.bug_id();
        let Some(bug) = self.bugs.get(id) else {
            tracing::debug!("Ignoring {} for bug {}: no longer listed", action.label(), id);
            return;
        };
        match action {
            RowAction::Update(_) => self.modal = Some(Modal::edit(bug)),
            RowAction::Delete(_) if self.confirm_delete => {
                self.modal = Some(Modal::confirm_delete(bug))
            }
            RowAction::Delete(_) => self.submit(Command::Delete {
                id,
                confirmed: true,
            }),
        }
    }

    pub fn open_search(&mut self) {
        self.modal = Some(Modal::search(&self.search_form));
    }

    /// Close a modal, keeping what was typed into the create/search forms
    pub fn close_modal(&mut self) {
        match self.modal.take() {
            Some(Modal::BugForm(state)) if state.mode == FormMode::Create => {
                self.create_form = state.to_bug_form();
            }
            Some(Modal::Search(state)) => self.search_form = state.form,
            _ => {}
        }
    }

    // ─── Worker updates ──────────────────────────────────────

    /// Apply the result of one command
    pub fn apply_update(&mut self, update: Update) {
        self.pending = self.pending.saturating_sub(1);
        self.bugs = BugList::from_server(update.bugs);
        if self.selected >= self.bugs.len() {
            self.selected = self.bugs.len().saturating_sub(1);
        }

        match update.form {
            Some(ReturnedForm::Create(form)) => self.create_form = form,
            Some(ReturnedForm::Search(form)) => self.search_form = form,
            None => {}
        }

        if update.kind == CommandKind::Refresh {
            self.loaded = true;
        }

        let message = match (&update.outcome, update.kind) {
            (Outcome::Applied, CommandKind::DeleteAccount) => {
                self.session_ended = true;
                self.should_quit = true;
                "Account deleted".to_string()
            }
            // Refresh is routine; only failures are worth a toast
            (Outcome::Applied, CommandKind::Refresh) => return,
            (Outcome::Applied, CommandKind::Search) => {
                format!("✓ Search: {} result(s)", self.bugs.len())
            }
            (Outcome::Applied, _) if !update.synced => {
                format!("✓ {} (list not reloaded, press r)", update.label)
            }
            (Outcome::Applied, _) => format!("✓ {}", update.label),
            (Outcome::Aborted, CommandKind::Edit) => {
                format!("{} cancelled: all four fields are required", update.label)
            }
            (Outcome::Aborted, _) => format!("{} cancelled", update.label),
            (Outcome::Failed(e), _) => format!("✗ {}: {}", update.label, e),
        };
        self.show_toast(message);
    }

    // ─── Toast ───────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        let message = truncate_to_width(&message.into(), TOAST_WIDTH);
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }
}
