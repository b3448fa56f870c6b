// bugdesk - terminal client for a small bug tracker
//
// Talks to a bug tracker backend over HTTP and keeps a local bug list in
// step with what the server confirms.
//
// Architecture:
// - api: BugApi trait and its reqwest implementation
// - sync: BugListClient, which applies server confirmations to the model
// - worker: a single task that runs queued operations in order
// - TUI (ratatui): table, forms, confirmations, diagnostics panel
// - cli: one-shot headless commands printing a plain-text table

mod api;
mod cli;
mod config;
mod logging;
mod model;
mod prompt;
mod render;
mod store;
mod sync;
mod tui;
mod util;
mod worker;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use logging::{LogBuffer, Output};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management works even when the file is broken
    if let Some(Commands::Config { show, reset, path }) = cli.command {
        cli::handle_config(show, reset, path);
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env()?;
    if let Some(server) = cli.server {
        config.server_url = server;
    }

    // In TUI mode: capture logs to buffer (prevents garbling the display)
    // In headless mode: write logs to stderr, keeping stdout for the table
    let log_buffer = LogBuffer::new();
    let output = match cli.command {
        None => Output::Tui(log_buffer.clone()),
        Some(_) => Output::Stderr,
    };
    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard = logging::init(&config.logging, output)?;

    tracing::debug!("Backend: {}", config.server_url);

    match cli.command {
        None => {
            tracing::info!("Starting TUI");
            tui::run_tui(config, log_buffer).await
        }
        Some(command) => cli::run(command, &config).await,
    }
}
