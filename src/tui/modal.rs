// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.
// Forms never talk to the backend: submitting yields a worker Command.

use crate::model::{Bug, BugForm, BugId, EditDraft, SearchForm, BUG_FORM_FIELDS};
use crate::worker::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions returned by modal input handling
#[derive(Debug, Clone)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal without sending anything
    Close,
    /// Close the modal and queue this command
    Submit(Command),
}

/// Which operation a bug form feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(BugId),
}

/// Four-field bug form (create, or edit prefilled from the row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugFormState {
    pub mode: FormMode,
    /// Values in `BUG_FORM_FIELDS` order
    pub values: [String; 4],
    /// Index of the focused field
    pub focus: usize,
}

impl BugFormState {
    /// Resume the create form with whatever it held last
    pub fn create(form: &BugForm) -> Self {
        Self {
            mode: FormMode::Create,
            values: BUG_FORM_FIELDS.map(|name| form.get(name).unwrap_or_default().to_string()),
            focus: 0,
        }
    }

    /// Edit form prefilled with the bug's current values
    pub fn edit(bug: &Bug) -> Self {
        let fields = bug.fields();
        Self {
            mode: FormMode::Edit(bug.id),
            values: [fields.title, fields.description, fields.status, fields.priority],
            focus: 0,
        }
    }

    pub fn to_bug_form(&self) -> BugForm {
        let mut form = BugForm::default();
        for (name, value) in BUG_FORM_FIELDS.iter().zip(&self.values) {
            form.set(name, value.clone());
        }
        form
    }

    /// Every field counts as answered; the draft gate rejects empty ones
    pub fn to_draft(&self) -> EditDraft {
        let [title, description, status, priority] = self.values.clone();
        EditDraft {
            title: Some(title),
            description: Some(description),
            status: Some(status),
            priority: Some(priority),
        }
    }

    fn submit(&self) -> Command {
        match self.mode {
            FormMode::Create => Command::Create(self.to_bug_form()),
            FormMode::Edit(id) => Command::Edit(id, self.to_draft()),
        }
    }

    fn handle_input(&mut self, key: KeyEvent) -> ModalAction {
        let count = self.values.len();
        match key.code {
            KeyCode::Esc => ModalAction::Close,
            KeyCode::Enter => ModalAction::Submit(self.submit()),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % count;
                ModalAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + count - 1) % count;
                ModalAction::None
            }
            _ => {
                edit_text(&mut self.values[self.focus], key);
                ModalAction::None
            }
        }
    }
}

/// Keyword + category search form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub form: SearchForm,
    /// 0 = keyword, 1 = category
    pub focus: usize,
}

impl SearchState {
    pub fn new(form: SearchForm) -> Self {
        Self { form, focus: 0 }
    }

    fn handle_input(&mut self, key: KeyEvent) -> ModalAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('n') {
            self.form.cycle_category();
            return ModalAction::None;
        }

        match key.code {
            KeyCode::Esc => ModalAction::Close,
            KeyCode::Enter => ModalAction::Submit(Command::Search(self.form.clone())),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = 1 - self.focus;
                ModalAction::None
            }
            _ => {
                let field = if self.focus == 0 {
                    &mut self.form.keyword
                } else {
                    &mut self.form.category
                };
                edit_text(field, key);
                ModalAction::None
            }
        }
    }
}

/// Append/delete at the end of a single-line field
fn edit_text(value: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => value.push(c),
        KeyCode::Backspace => {
            value.pop();
        }
        _ => {}
    }
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Create or edit form
    BugForm(BugFormState),
    /// Search form
    Search(SearchState),
    /// "Are you sure you want to delete this bug?"
    ConfirmDelete { id: BugId, title: String },
    /// Account deletion, irreversible
    ConfirmDeleteAccount,
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn create(form: &BugForm) -> Self {
        Modal::BugForm(BugFormState::create(form))
    }

    pub fn edit(bug: &Bug) -> Self {
        Modal::BugForm(BugFormState::edit(bug))
    }

    pub fn search(form: &SearchForm) -> Self {
        Modal::Search(SearchState::new(form.clone()))
    }

    pub fn confirm_delete(bug: &Bug) -> Self {
        Modal::ConfirmDelete {
            id: bug.id,
            title: bug.title.clone(),
        }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyEvent) -> ModalAction {
        match self {
            Modal::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::BugForm(state) => state.handle_input(key),
            Modal::Search(state) => state.handle_input(key),
            Modal::ConfirmDelete { id, .. } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => ModalAction::Submit(Command::Delete {
                    id: *id,
                    confirmed: true,
                }),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ModalAction::Close,
                _ => ModalAction::None,
            },
            // Typed 'y' only; Enter is too easy to hit by accident here
            Modal::ConfirmDeleteAccount => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    ModalAction::Submit(Command::DeleteAccount { confirmed: true })
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ModalAction::Close,
                _ => ModalAction::None,
            },
        }
    }
}
