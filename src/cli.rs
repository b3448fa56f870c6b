// CLI module - command-line argument parsing and headless handlers
//
// With no subcommand the TUI starts. Every bug operation is also available
// as a one-shot command that prints the resulting table to stdout:
// - list / create / edit / delete / search / delete-account
// - config --show | --path | --reset

use crate::api::{BugApi, HttpBugApi};
use crate::config::{Config, VERSION};
use crate::model::{BugForm, BugId, SearchForm};
use crate::prompt::{collect_edit_draft, LinePrompter, Prompter};
use crate::render::{render_bug_table, to_plain_table};
use crate::sync::{BugListClient, Outcome};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

/// bugdesk - terminal client for a small bug tracker
#[derive(Parser, Debug)]
#[command(name = "bugdesk")]
#[command(version = VERSION)]
#[command(about = "Terminal client for a small bug tracker", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides config and BUGDESK_SERVER_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print all bugs
    List,

    /// Create a bug (values are sent as given)
    Create {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        status: String,

        #[arg(long, default_value = "")]
        priority: String,
    },

    /// Update every field of a bug (prompts for each)
    Edit {
        /// Bug id
        id: BugId,
    },

    /// Delete a bug
    Delete {
        /// Bug id
        id: BugId,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Search bugs by keyword within a category
    Search {
        keyword: String,

        /// title, status, priority, date_created
        #[arg(long, short, default_value = "title")]
        category: String,
    },

    /// Delete the logged-in account
    DeleteAccount {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Bug commands
// ─────────────────────────────────────────────────────────────────────────────

/// Run a headless bug command against the configured backend
pub async fn run(command: Commands, config: &Config) -> Result<()> {
    let api = HttpBugApi::from_config(config).context("Cannot create HTTP client")?;
    let mut client = BugListClient::new(api);

    let outcome = match command {
        Commands::List => client.refresh().await,
        Commands::Create {
            title,
            description,
            status,
            priority,
        } => {
            let mut form = BugForm::new(&title, &description, &status, &priority);
            client.create_bug(&mut form).await
        }
        Commands::Edit { id } => {
            let draft = collect_edit_draft(&mut LinePrompter::stdio());
            client.edit_bug(id, &draft).await
        }
        Commands::Delete { id, yes } => {
            // Load first so the printed table reflects the removal
            client.refresh().await;
            let confirmed = yes
                || LinePrompter::stdio().confirm(&format!("Are you sure you want to delete bug {}?", id));
            client.delete_bug(id, confirmed).await
        }
        Commands::Search { keyword, category } => {
            let mut form = SearchForm::new(&keyword, &category);
            client.search_bugs(&mut form).await
        }
        Commands::DeleteAccount { yes } => {
            let confirmed = yes
                || LinePrompter::stdio().confirm(
                    "Are you sure you want to delete your account? This cannot be undone.",
                );
            let outcome = client.delete_account(confirmed).await;
            if outcome.is_applied() {
                println!("Account deleted. The session has ended.");
                return Ok(());
            }
            return listing(outcome, &client).map(|_| ());
        }
        Commands::Config { show, reset, path } => {
            handle_config(show, reset, path);
            return Ok(());
        }
    };

    if let Some(table) = listing(outcome, &client)? {
        print!("{}", table);
    }
    Ok(())
}

/// The table to print after a command.
///
/// Failures become the process error. So does a write whose follow-up
/// reload failed: the change went through, but the model is not what the
/// server holds and printing it would claim otherwise.
fn listing<A: BugApi>(outcome: Outcome, client: &BugListClient<A>) -> Result<Option<String>> {
    match outcome {
        Outcome::Applied if !client.is_synced() => Err(anyhow!(
            "The change was saved, but the bug list could not be reloaded. \
             Run `bugdesk list` to see the current state."
        )),
        Outcome::Applied => Ok(Some(to_plain_table(&render_bug_table(
            client.bugs(),
            &chrono::Local,
        )))),
        Outcome::Aborted => {
            eprintln!("Cancelled, nothing was sent.");
            Ok(None)
        }
        Outcome::Failed(e) => Err(anyhow!(e)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config commands
// ─────────────────────────────────────────────────────────────────────────────

/// Handle `config` flags. Does not need a valid config file.
pub fn handle_config(show: bool, reset: bool, path: bool) {
    if path {
        handle_config_path();
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset();
    } else {
        // No flag provided, show help
        println!("Usage: bugdesk config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        let question = format!("Config file exists at {}. Overwrite?", path.display());
        if !LinePrompter::stdio().confirm(&question) {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = Config::write_template(&path) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::model::tests::bug;
    use crate::sync::tests::FakeApi;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["bugdesk", "delete", "7", "--yes", "--server", "http://h:1"]);
        assert_eq!(cli.server.as_deref(), Some("http://h:1"));
        assert!(matches!(
            cli.command,
            Some(Commands::Delete { id: BugId(7), yes: true })
        ));

        let cli = Cli::parse_from(["bugdesk", "search", "crash", "-c", "status"]);
        match cli.command {
            Some(Commands::Search { keyword, category }) => {
                assert_eq!(keyword, "crash");
                assert_eq!(category, "status");
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(Cli::parse_from(["bugdesk"]).command.is_none());
        assert!(Cli::try_parse_from(["bugdesk", "edit", "abc"]).is_err());
    }

    #[tokio::test]
    async fn test_listing_prints_confirmed_table() {
        let mut client = BugListClient::new(FakeApi::with_bugs(vec![bug(1, "Crash on save")]));
        let outcome = client.refresh().await;

        let table = listing(outcome, &client).unwrap().unwrap();
        assert!(table.contains("Crash on save"));

        assert!(listing(Outcome::Aborted, &client).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_listing_refuses_unconfirmed_table() {
        let mut client = BugListClient::new(FakeApi::default());
        *client.api().list_failure.lock().unwrap() = Some(ApiError::Status {
            status: 302,
            message: "/login".to_string(),
        });

        let mut form = BugForm::new("A", "d", "open", "low");
        let outcome = client.create_bug(&mut form).await;
        assert_eq!(outcome, Outcome::Applied);

        let err = listing(outcome, &client).unwrap_err();
        assert!(err.to_string().contains("could not be reloaded"));
    }

    #[tokio::test]
    async fn test_listing_turns_failure_into_error() {
        let client = BugListClient::new(FakeApi::default());
        let err = listing(
            Outcome::Failed(ApiError::Status {
                status: 400,
                message: "Missing data".to_string(),
            }),
            &client,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Missing data"));
    }
}
