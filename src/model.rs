// Bug records and the typed forms that produce request bodies
//
// The backend speaks plain JSON: bugs come back as flat objects with an
// integer id and a naive UTC timestamp ("%Y-%m-%d %H:%M:%S"). Forms are the
// client-side input side: BugForm for create, EditDraft for update,
// SearchForm for search.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned bug identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BugId(pub u64);

impl BugId {
    /// Row identity used by the rendered table: `bugRow_{id}`
    pub fn row_key(&self) -> String {
        format!("bugRow_{}", self.0)
    }
}

impl fmt::Display for BugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BugId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(BugId)
    }
}

/// A tracked issue as confirmed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bug {
    pub id: BugId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(with = "server_time")]
    pub date_created: NaiveDateTime,
}

impl Bug {
    /// The mutable part of this bug, e.g. to prefill an edit dialog
    pub fn fields(&self) -> BugFields {
        BugFields {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            priority: self.priority.clone(),
        }
    }
}

/// JSON body for create (POST /bugs) and update (PUT /bugs/{id})
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugFields {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
}

/// Reply to POST /bugs
///
/// The documented contract is the created bug; the reference backend only
/// acknowledges with `{"message": ..., "bug_id": ...}`. Both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreateReply {
    Created(Bug),
    Ack {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        bug_id: Option<BugId>,
    },
}

impl CreateReply {
    pub fn bug_id(&self) -> Option<BugId> {
        match self {
            CreateReply::Created(bug) => Some(bug.id),
            CreateReply::Ack { bug_id, .. } => *bug_id,
        }
    }

    /// Acknowledgement text, when the server sent one
    pub fn message(&self) -> Option<&str> {
        match self {
            CreateReply::Created(_) => None,
            CreateReply::Ack { message, .. } => message.as_deref(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Forms
// ─────────────────────────────────────────────────────────────────────────────

/// Field names of the create form, in display order
pub const BUG_FORM_FIELDS: [&str; 4] = ["title", "description", "status", "priority"];

/// Create form contents
///
/// Values are submitted verbatim; the create path does no validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BugForm {
    pub fields: BugFields,
}

impl BugForm {
    pub fn new(title: &str, description: &str, status: &str, priority: &str) -> Self {
        Self {
            fields: BugFields {
                title: title.to_string(),
                description: description.to_string(),
                status: status.to_string(),
                priority: priority.to_string(),
            },
        }
    }

    /// Set a field by its form name. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match name {
            "title" => self.fields.title = value,
            "description" => self.fields.description = value,
            "status" => self.fields.status = value,
            "priority" => self.fields.priority = value,
            other => tracing::debug!("Ignoring unknown form field '{}'", other),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.fields.title),
            "description" => Some(&self.fields.description),
            "status" => Some(&self.fields.status),
            "priority" => Some(&self.fields.priority),
            _ => None,
        }
    }

    /// Reset every field to empty
    pub fn clear(&mut self) {
        self.fields = BugFields::default();
    }

    pub fn is_empty(&self) -> bool {
        self.fields == BugFields::default()
    }
}

/// Result of the edit dialog
///
/// `None` means the field was cancelled. The draft only becomes a request
/// body through [`EditDraft::validate`], which is all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl EditDraft {
    /// Draft with every field present (e.g. a submitted dialog)
    pub fn complete(fields: BugFields) -> Self {
        Self {
            title: Some(fields.title),
            description: Some(fields.description),
            status: Some(fields.status),
            priority: Some(fields.priority),
        }
    }

    /// All four values present and non-empty, or nothing.
    ///
    /// An empty string counts as cancelled, so a field can never be cleared
    /// through an edit.
    pub fn validate(&self) -> Option<BugFields> {
        fn filled(value: &Option<String>) -> Option<String> {
            value.as_ref().filter(|v| !v.is_empty()).cloned()
        }

        Some(BugFields {
            title: filled(&self.title)?,
            description: filled(&self.description)?,
            status: filled(&self.status)?,
            priority: filled(&self.priority)?,
        })
    }
}

/// Search categories understood by the reference backend
pub const SEARCH_CATEGORIES: [&str; 4] = ["title", "status", "priority", "date_created"];

/// Search form contents; both values are free text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub keyword: String,
    pub category: String,
}

impl SearchForm {
    pub fn new(keyword: &str, category: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            category: category.to_string(),
        }
    }

    pub fn clear(&mut self) {
        self.keyword.clear();
        self.category.clear();
    }

    /// Advance the category through [`SEARCH_CATEGORIES`], wrapping around.
    /// A free-text category restarts the cycle.
    pub fn cycle_category(&mut self) {
        let next = SEARCH_CATEGORIES
            .iter()
            .position(|c| *c == self.category)
            .map(|i| (i + 1) % SEARCH_CATEGORIES.len())
            .unwrap_or(0);
        self.category = SEARCH_CATEGORIES[next].to_string();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Timestamp wire format
// ─────────────────────────────────────────────────────────────────────────────

/// `date_created` as the backend writes it: naive UTC, second precision.
/// ISO-8601 variants are accepted on input; offsets are normalized to UTC.
pub mod server_time {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        NaiveDateTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc()))
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognized timestamp '{}'", raw))
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Bug fixture shared by the other test modules
    pub(crate) fn bug(id: u64, title: &str) -> Bug {
        Bug {
            id: BugId(id),
            title: title.to_string(),
            description: format!("{} description", title),
            status: "open".to_string(),
            priority: "low".to_string(),
            date_created: NaiveDate::from_ymd_opt(2024, 3, 1)
                .and_then(|d| d.and_hms_opt(12, 30, 0))
                .unwrap(),
        }
    }

    #[test]
    fn test_bug_parses_backend_json() {
        let json = r#"{"id": 3, "title": "x", "description": "y", "status": "open",
                       "priority": "high", "date_created": "2024-03-01 12:30:00"}"#;
        let bug: Bug = serde_json::from_str(json).unwrap();
        assert_eq!(bug.id, BugId(3));
        assert_eq!(bug.priority, "high");
        assert_eq!(bug.date_created.to_string(), "2024-03-01 12:30:00");
    }

    #[test]
    fn test_bug_accepts_iso_timestamps() {
        assert_eq!(
            server_time::parse("2024-03-01T12:30:00.250"),
            server_time::parse("2024-03-01 12:30:00.250")
        );
        // Offsets are normalized to UTC
        let shifted = server_time::parse("2024-03-01T14:30:00+02:00").unwrap();
        assert_eq!(shifted.format(server_time::FORMAT).to_string(), "2024-03-01 12:30:00");
        assert!(server_time::parse("yesterday").is_none());
    }

    #[test]
    fn test_bug_serializes_server_format() {
        let value = serde_json::to_value(bug(1, "a")).unwrap();
        assert_eq!(value["date_created"], "2024-03-01 12:30:00");
        assert_eq!(value["id"], 1);
    }

    #[test]
    fn test_create_reply_variants() {
        let ack: CreateReply =
            serde_json::from_str(r#"{"message": "Bug created successfully", "bug_id": 9}"#).unwrap();
        assert_eq!(ack.bug_id(), Some(BugId(9)));
        assert_eq!(ack.message(), Some("Bug created successfully"));

        let created: CreateReply = serde_json::to_string(&bug(7, "A"))
            .and_then(|s| serde_json::from_str(&s))
            .unwrap();
        assert!(matches!(created, CreateReply::Created(_)));
        assert_eq!(created.bug_id(), Some(BugId(7)));
        assert_eq!(created.message(), None);
    }

    #[test]
    fn test_edit_draft_gate() {
        let full = EditDraft {
            title: Some("t".into()),
            description: Some("d".into()),
            status: Some("closed".into()),
            priority: Some("high".into()),
        };
        assert_eq!(
            full.validate(),
            Some(BugFields {
                title: "t".into(),
                description: "d".into(),
                status: "closed".into(),
                priority: "high".into(),
            })
        );

        let cancelled = EditDraft {
            priority: None,
            ..full.clone()
        };
        assert_eq!(cancelled.validate(), None);

        // Clearing a field is indistinguishable from cancelling it
        let cleared = EditDraft {
            description: Some(String::new()),
            ..full
        };
        assert_eq!(cleared.validate(), None);
    }

    #[test]
    fn test_bug_form_set_and_clear() {
        let mut form = BugForm::default();
        form.set("title", "A");
        form.set("priority", "low");
        form.set("assignee", "nobody");
        assert_eq!(form.get("title"), Some("A"));
        assert_eq!(form.get("assignee"), None);
        assert!(!form.is_empty());

        form.clear();
        assert!(form.is_empty());
    }

    #[test]
    fn test_search_category_cycle() {
        let mut form = SearchForm::new("crash", "ui");
        form.cycle_category();
        assert_eq!(form.category, "title");
        form.cycle_category();
        form.cycle_category();
        form.cycle_category();
        assert_eq!(form.category, "date_created");
        form.cycle_category();
        assert_eq!(form.category, "title");
    }

    #[test]
    fn test_row_key() {
        assert_eq!(BugId(42).row_key(), "bugRow_42");
        assert_eq!("7".parse::<BugId>().unwrap(), BugId(7));
    }
}
