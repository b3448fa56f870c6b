// Bug table rendering
//
// Pure functions from the client model to presentation rows. The TUI builds
// its ratatui table from these rows and the CLI prints them as plain text, so
// both front ends always show the same thing for the same model.

use crate::model::{Bug, BugId};
use crate::store::BugList;
use crate::util::{fit_to_width, single_line};
use chrono::{NaiveDateTime, TimeZone};
use std::fmt::Display;

/// Column headers in row cell order
pub const HEADERS: [&str; 5] = ["Title", "Description", "Status", "Priority", "Created"];

/// Per-row controls, each bound to the row's id at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Update(BugId),
    Delete(BugId),
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Update(_) => "Update",
            RowAction::Delete(_) => "Delete",
        }
    }

    pub fn bug_id(&self) -> BugId {
        match self {
            RowAction::Update(id) | RowAction::Delete(id) => *id,
        }
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugRow {
    /// Row identity, `bugRow_{id}`
    pub key: String,
    pub id: BugId,
    /// Title, description, status, priority, created
    pub cells: [String; 5],
    pub actions: [RowAction; 2],
}

/// Format a server timestamp (naive UTC) in the viewer's time zone
pub fn format_created<Tz>(created: &NaiveDateTime, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.from_utc_datetime(created)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Render one bug
pub fn render_row<Tz>(bug: &Bug, tz: &Tz) -> BugRow
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    BugRow {
        key: bug.id.row_key(),
        id: bug.id,
        cells: [
            bug.title.clone(),
            bug.description.clone(),
            bug.status.clone(),
            bug.priority.clone(),
            format_created(&bug.date_created, tz),
        ],
        actions: [RowAction::Update(bug.id), RowAction::Delete(bug.id)],
    }
}

/// Render the whole table: exactly one row per bug, in model order.
///
/// Previous output is never merged; calling this twice on the same model
/// yields identical rows.
pub fn render_bug_table<Tz>(bugs: &BugList, tz: &Tz) -> Vec<BugRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    bugs.iter().map(|bug| render_row(bug, tz)).collect()
}

/// Fixed column widths for plain-text output
const PLAIN_WIDTHS: [usize; 6] = [6, 24, 36, 10, 10, 19];

/// Plain-text table for headless output
pub fn to_plain_table(rows: &[BugRow]) -> String {
    let mut out = String::new();

    let header: Vec<String> = std::iter::once("ID")
        .chain(HEADERS)
        .zip(PLAIN_WIDTHS)
        .map(|(h, w)| fit_to_width(h, w))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    let rule: Vec<String> = PLAIN_WIDTHS.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');

    if rows.is_empty() {
        out.push_str("(no bugs)\n");
        return out;
    }

    for row in rows {
        let id = row.id.to_string();
        let line: Vec<String> = std::iter::once(id.as_str())
            .chain(row.cells.iter().map(String::as_str))
            .zip(PLAIN_WIDTHS)
            .map(|(cell, w)| fit_to_width(&single_line(cell), w))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
