// Line-oriented input for the headless CLI
//
// The TUI collects edits through a form modal; on a plain terminal the
// edit dialog degrades to four sequential prompts. Either way the result is
// an EditDraft and the same all-or-nothing gate applies.

use crate::model::EditDraft;
use std::io::{BufRead, Write};

/// Source of user answers
pub trait Prompter {
    /// Ask for a value. `None` means the user cancelled (EOF).
    fn prompt(&mut self, message: &str) -> Option<String>;

    /// Ask a yes/no question; anything but an explicit yes is a no
    fn confirm(&mut self, message: &str) -> bool {
        self.prompt(&format!("{} [y/N] ", message))
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }
}

/// Ask for the new title, description, status, and priority, in that order.
///
/// Every prompt is shown even after a cancellation; the draft records
/// which answers are missing and the gate decides.
pub fn collect_edit_draft(prompter: &mut impl Prompter) -> EditDraft {
    EditDraft {
        title: prompter.prompt("Enter the new title for the bug: "),
        description: prompter.prompt("Enter the new description for the bug: "),
        status: prompter.prompt("Enter the new status for the bug: "),
        priority: prompter.prompt("Enter the new priority for the bug: "),
    }
}

/// Prompter over any reader/writer pair (stdin/stderr in practice)
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompter<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompts on stderr so stdout stays clean for table output
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn prompt(&mut self, message: &str) -> Option<String> {
        if write!(self.output, "{}", message)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return None;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}
