//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        // An unset cookie stays commented out so the template parses
        let session = match &self.session_cookie {
            Some(cookie) => format!("session_cookie = {:?}\n", cookie),
            None => "# session_cookie = \"<value of the 'session' cookie after logging in>\"\n"
                .to_string(),
        };

        format!(
            r#"# bugdesk configuration

# Bug tracker backend (env: BUGDESK_SERVER_URL, flag: --server)
server_url = {server_url:?}

# Per-request timeout in seconds (env: BUGDESK_TIMEOUT)
request_timeout_secs = {timeout}

# The backend only answers logged-in sessions (env: BUGDESK_SESSION)
{session}
# Ask before deleting a bug
confirm_delete = {confirm_delete}

# Logging configuration (RUST_LOG env var overrides level)
[logging]
level = {log_level:?}
# File logging (in addition to the TUI diagnostics panel or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix:?}
"#,
            server_url = self.server_url,
            timeout = self.request_timeout_secs,
            session = session,
            confirm_delete = self.confirm_delete,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
