//! Backend API abstraction
//!
//! The bug tracker server is an external collaborator reached over plain
//! HTTP + JSON. [`BugApi`] is the seam between the synchronization logic and
//! the transport:
//!
//! ```text
//! BugApi trait
//! ├── HttpBugApi (reqwest, production)
//! └── test doubles (recording fakes in sync tests)
//! ```
//!
//! Every call is a single attempt. Retrying is deliberately left to the
//! caller, and no caller does.

mod error;
mod http;


pub use error::ApiError;
pub use http::HttpBugApi;

use crate::model::{Bug, BugFields, BugId, CreateReply, SearchForm};
use std::future::Future;

/// Endpoint paths, relative to the server base URL
pub mod paths {
    pub const LIST: &str = "json";
    pub const BUGS: &str = "bugs";
    pub const SEARCH: &str = "search";
    pub const DELETE_ACCOUNT: &str = "delete-account";

    pub fn bug(id: crate::model::BugId) -> String {
        format!("bugs/{}", id)
    }
}

/// Operations the backend exposes for bugs
pub trait BugApi: Send + Sync {
    /// GET /json - the full bug list.
    ///
    /// Stands in for reloading the HTML index page after a write. The two are
    /// not the same query: the index page shows only the logged-in user's
    /// bugs, while `/json` returns every user's bugs.
    fn list(&self) -> impl Future<Output = Result<Vec<Bug>, ApiError>> + Send;

    /// POST /bugs
    fn create(&self, fields: &BugFields) -> impl Future<Output = Result<CreateReply, ApiError>> + Send;

    /// PUT /bugs/{id} - all four fields, always
    fn update(
        &self,
        id: BugId,
        fields: &BugFields,
    ) -> impl Future<Output = Result<serde_json::Value, ApiError>> + Send;

    /// DELETE /bugs/{id}
    fn delete(&self, id: BugId) -> impl Future<Output = Result<serde_json::Value, ApiError>> + Send;

    /// GET /search?keyword=..&category=..
    fn search(&self, query: &SearchForm) -> impl Future<Output = Result<Vec<Bug>, ApiError>> + Send;

    /// GET /delete-account
    fn delete_account(&self) -> impl Future<Output = Result<(), ApiError>> + Send;
}
