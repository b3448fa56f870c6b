// Operation worker
//
// The TUI never talks to the backend itself. It queues commands here; a
// single task owns the BugListClient and runs them strictly in submission
// order, sending back one update per command. Overlapping operations
// therefore cannot race: a search queued after a delete always sees the
// delete's result.

use crate::api::BugApi;
use crate::model::{Bug, BugForm, BugId, EditDraft, SearchForm};
use crate::sync::{BugListClient, Outcome};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Queue depth before `try_send` refuses
const COMMAND_BUFFER: usize = 64;

/// Work for the sync client
#[derive(Debug, Clone)]
pub enum Command {
    Refresh,
    Create(BugForm),
    Edit(BugId, EditDraft),
    Delete { id: BugId, confirmed: bool },
    Search(SearchForm),
    DeleteAccount { confirmed: bool },
}

impl Command {
    /// Short label for toasts and logs
    pub fn label(&self) -> String {
        match self {
            Command::Refresh => "Refresh".to_string(),
            Command::Create(_) => "Create".to_string(),
            Command::Edit(id, _) => format!("Update #{}", id),
            Command::Delete { id, .. } => format!("Delete #{}", id),
            Command::Search(_) => "Search".to_string(),
            Command::DeleteAccount { .. } => "Delete account".to_string(),
        }
    }
}

/// A form handed back after its command ran (cleared on success)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnedForm {
    Create(BugForm),
    Search(SearchForm),
}

/// Result of one command
#[derive(Debug, Clone)]
pub struct Update {
    /// `Command::label()` of the command that produced this
    pub label: String,
    pub kind: CommandKind,
    pub outcome: Outcome,
    /// Model snapshot after the command, in table order
    pub bugs: Vec<Bug>,
    /// Whether the snapshot still mirrors the server
    pub synced: bool,
    pub form: Option<ReturnedForm>,
}

/// Which command an update belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Refresh,
    Create,
    Edit,
    Delete,
    Search,
    DeleteAccount,
}

/// Handle for queueing commands
#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::Sender<Command>,
}

impl WorkerHandle {
    /// Queue without waiting; fails when the queue is full or closed
    pub fn try_send(&self, command: Command) -> bool {
        match self.tx.try_send(command) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Dropped command: {}", e);
                false
            }
        }
    }
}

/// Spawn the worker task around a client
pub fn spawn<A>(client: BugListClient<A>) -> (WorkerHandle, mpsc::Receiver<Update>, JoinHandle<()>)
where
    A: BugApi + 'static,
{
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let (update_tx, update_rx) = mpsc::channel(COMMAND_BUFFER);
    let task = tokio::spawn(run(client, rx, update_tx));
    (WorkerHandle { tx }, update_rx, task)
}

/// Process commands until every handle is dropped
async fn run<A: BugApi>(
    mut client: BugListClient<A>,
    mut commands: mpsc::Receiver<Command>,
    updates: mpsc::Sender<Update>,
) {
    while let Some(command) = commands.recv().await {
        let update = execute(&mut client, command).await;
        if updates.send(update).await.is_err() {
            tracing::debug!("Update receiver closed, stopping worker");
            break;
        }
    }
}

/// Run one command against the client
pub async fn execute<A: BugApi>(client: &mut BugListClient<A>, command: Command) -> Update {
    let label = command.label();
    tracing::debug!("Running {}", label);

    let (kind, outcome, form) = match command {
        Command::Refresh => (CommandKind::Refresh, client.refresh().await, None),
        Command::Create(mut form) => {
            let outcome = client.create_bug(&mut form).await;
            (CommandKind::Create, outcome, Some(ReturnedForm::Create(form)))
        }
        Command::Edit(id, draft) => (CommandKind::Edit, client.edit_bug(id, &draft).await, None),
        Command::Delete { id, confirmed } => (
            CommandKind::Delete,
            client.delete_bug(id, confirmed).await,
            None,
        ),
        Command::Search(mut form) => {
            let outcome = client.search_bugs(&mut form).await;
            (CommandKind::Search, outcome, Some(ReturnedForm::Search(form)))
        }
        Command::DeleteAccount { confirmed } => (
            CommandKind::DeleteAccount,
            client.delete_account(confirmed).await,
            None,
        ),
    };

    Update {
        label,
        kind,
        outcome,
        bugs: client.bugs().as_slice().to_vec(),
        synced: client.is_synced(),
        form,
    }
}
