//! Bug list synchronization
//!
//! [`BugListClient`] owns the client model and applies every server
//! confirmation to it. The rules:
//!
//! | Operation | Request | On success |
//! |-----------|---------|------------|
//! | create    | POST /bugs | clear form, one refresh |
//! | edit      | PUT /bugs/{id} (only if the draft passes the gate) | one refresh |
//! | delete    | DELETE /bugs/{id} (only if confirmed) | remove that row |
//! | search    | GET /search | clear form, replace table |
//! | refresh   | GET /json | replace table |
//!
//! Failures are logged and leave the model untouched; nothing is retried.
//! Cancelled input sends nothing and reports nothing.
//!
//! When a create or edit succeeds but its follow-up refresh does not, the
//! operation still counts as applied. The client then reports itself as out
//! of sync so callers know the model no longer mirrors the server.

use crate::api::{ApiError, BugApi};
use crate::model::{BugForm, BugId, EditDraft, SearchForm};
use crate::store::BugList;
use std::fmt;

/// What an operation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Server confirmed, model reconciled
    Applied,
    /// Cancelled before any request was sent
    Aborted,
    /// Request failed; model unchanged
    Failed(ApiError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied => write!(f, "done"),
            Outcome::Aborted => write!(f, "cancelled"),
            Outcome::Failed(e) => write!(f, "{}", e),
        }
    }
}

/// Client-side owner of the bug list
pub struct BugListClient<A> {
    api: A,
    bugs: BugList,
    /// Model equals the server's last full answer (list or search)
    synced: bool,
}

impl<A: BugApi> BugListClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            bugs: BugList::new(),
            synced: false,
        }
    }

    /// The current model
    pub fn bugs(&self) -> &BugList {
        &self.bugs
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Whether the model can be shown as the server's state.
    ///
    /// False before the first successful refresh or search, and again after
    /// any refresh fails. A direct delete patch keeps the current value.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Re-fetch the full list and replace the model
    pub async fn refresh(&mut self) -> Outcome {
        match self.api.list().await {
            Ok(bugs) => {
                tracing::debug!("Refreshed bug list: {} bugs", bugs.len());
                self.bugs.replace_all(bugs);
                self.synced = true;
                Outcome::Applied
            }
            Err(e) => {
                self.synced = false;
                failed("refreshing bugs", e)
            }
        }
    }

    /// Submit the create form.
    ///
    /// On success the form is cleared and the list is re-fetched once. A
    /// failed re-fetch does not turn this into a failure (the bug exists
    /// either way) but leaves the client out of sync.
    pub async fn create_bug(&mut self, form: &mut BugForm) -> Outcome {
        match self.api.create(&form.fields).await {
            Ok(reply) => {
                match reply.bug_id() {
                    Some(id) => tracing::info!("Created bug {}", id),
                    None => tracing::info!("Created bug"),
                }
                if let Some(message) = reply.message() {
                    tracing::debug!("Server replied: {}", message);
                }
                form.clear();
                self.reload_after("creating bug").await;
                Outcome::Applied
            }
            Err(e) => failed("creating bug", e),
        }
    }

    /// Update a bug from an edit dialog result.
    ///
    /// All four fields must be present and non-empty, otherwise nothing is
    /// sent. When they are, all four go out whether changed or not.
    pub async fn edit_bug(&mut self, id: BugId, draft: &EditDraft) -> Outcome {
        let Some(fields) = draft.validate() else {
            tracing::debug!("Edit of bug {} abandoned: incomplete draft", id);
            return Outcome::Aborted;
        };

        match self.api.update(id, &fields).await {
            Ok(_) => {
                tracing::info!("Updated bug {}", id);
                self.reload_after(&format!("updating bug {}", id)).await;
                Outcome::Applied
            }
            Err(e) => failed(&format!("updating bug {}", id), e),
        }
    }

    /// Delete a bug after the user's answer to the confirmation.
    ///
    /// The matching row is removed directly; the rest of the model is left
    /// as it was.
    pub async fn delete_bug(&mut self, id: BugId, confirmed: bool) -> Outcome {
        if !confirmed {
            return Outcome::Aborted;
        }

        match self.api.delete(id).await {
            Ok(_) => {
                if self.bugs.remove(id).is_none() {
                    tracing::debug!("Deleted bug {} was not in the table", id);
                }
                tracing::info!("Deleted bug {}", id);
                Outcome::Applied
            }
            Err(e) => failed(&format!("deleting bug {}", id), e),
        }
    }

    /// Run a search and show its results in place of the table
    pub async fn search_bugs(&mut self, form: &mut SearchForm) -> Outcome {
        match self.api.search(form).await {
            Ok(bugs) => {
                tracing::info!(
                    "Search '{}' in '{}': {} result(s)",
                    form.keyword,
                    form.category,
                    bugs.len()
                );
                form.clear();
                self.bugs.replace_all(bugs);
                self.synced = true;
                Outcome::Applied
            }
            Err(e) => failed("searching bugs", e),
        }
    }

    /// Request account deletion after the user's confirmation
    pub async fn delete_account(&mut self, confirmed: bool) -> Outcome {
        if !confirmed {
            return Outcome::Aborted;
        }

        match self.api.delete_account().await {
            Ok(()) => {
                tracing::warn!("Account deletion requested");
                Outcome::Applied
            }
            Err(e) => failed("deleting account", e),
        }
    }

    /// Follow-up refresh after a successful write
    async fn reload_after(&mut self, action: &str) {
        if !self.refresh().await.is_applied() {
            tracing::warn!("Done {} but the bug list could not be reloaded", action);
        }
    }
}

/// Log a failed operation to the diagnostic channel
fn failed(action: &str, error: ApiError) -> Outcome {
    tracing::error!("Error {}: {}", action, error);
    Outcome::Failed(error)
}
