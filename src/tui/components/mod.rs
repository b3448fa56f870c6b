// Components module - UI building blocks
//
// Every frame renders, top to bottom:
// - Title bar: app name, backend, activity spinner
// - Bug table: the client model
// - Diagnostics: tail of the log buffer
// - Status bar: counts, last error, key hints
//
// The toast floats over all of them.

pub mod bug_table;
pub mod logs_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
