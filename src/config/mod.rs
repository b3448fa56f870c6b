//! Configuration for the bug tracker client
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (server URL only)
//! 2. Environment variables
//! 3. Config file (~/.config/bugdesk/config.toml)
//! 4. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Flask's development server address
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable names
pub mod env {
    pub const SERVER_URL: &str = "BUGDESK_SERVER_URL";
    pub const TIMEOUT: &str = "BUGDESK_TIMEOUT";
    pub const SESSION: &str = "BUGDESK_SESSION";
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the bug tracker backend
    pub server_url: String,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Session cookie forwarded on every request (the backend requires a
    /// logged-in session). A bare value is sent as `session=<value>`.
    pub session_cookie: Option<String>,

    /// Ask before deleting a bug in the TUI
    pub confirm_delete: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_cookie: None,
            confirm_delete: true,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub server_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub session_cookie: Option<String>,
    pub confirm_delete: Option<bool>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/bugdesk/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("bugdesk").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Ignore errors - config is optional
        if let Err(e) = Self::write_template(&path) {
            tracing::debug!("Could not write config template {}: {}", path.display(), e);
        }
    }

    /// Write `Config::default().to_toml()` to `path`, creating parent dirs
    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, Self::default().to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Parse a config file.
    ///
    /// A missing file is the same as an empty one. A file that exists but
    /// does not parse is an error: silently falling back to defaults would
    /// point the client at the wrong server.
    pub(crate) fn load_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse configuration file {}\n  \
                     Check for missing quotes, invalid booleans (use true/false) or typos in keys.\n  \
                     To reset, run `bugdesk config --reset`.",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge a file config with environment lookups
    pub(crate) fn resolve(file: FileConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        // Server URL: env > file > default
        let server_url = lookup(env::SERVER_URL)
            .or(file.server_url)
            .unwrap_or(defaults.server_url);

        // Timeout: env > file > default
        let request_timeout_secs = match lookup(env::TIMEOUT) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a number of seconds, got '{}'", env::TIMEOUT, raw))?,
            None => file
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
        };

        // Session cookie: env > file; empty means none
        let session_cookie = lookup(env::SESSION)
            .or(file.session_cookie)
            .filter(|s| !s.trim().is_empty());

        let confirm_delete = file.confirm_delete.unwrap_or(defaults.confirm_delete);
        let logging = LoggingConfig::from_file(file.logging);

        Ok(Self {
            server_url,
            request_timeout_secs,
            session_cookie,
            confirm_delete,
            logging,
        })
    }
}
