//! CLI command definitions and dispatch for the `compass` binary.
//!
//! Uses clap derive macros for argument parsing. Subcommands group by
//! resource (`compass history list`, `compass session new`).

pub mod careers;
pub mod chat;
pub mod history;
pub mod quiz;
pub mod session;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

/// Career guidance from the terminal: advisor chat, quiz and career browser.
#[derive(Parser)]
#[command(name = "compass", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, global = true, env = "COMPASS_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to config).
        #[arg(long)]
        host: Option<String>,
    },

    /// Show or replace the local session identifier.
    Session {
        #[command(subcommand)]
        action: SessionCommand,
    },

    /// Start an interactive chat with the career advisor.
    Chat {
        /// Continue a saved conversation by ID.
        #[arg(long)]
        resume: Option<String>,
    },

    /// Manage saved conversations for this session.
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },

    /// Browse the career catalog.
    Careers {
        /// Case-insensitive text search over title, description and skills.
        #[arg(short, long)]
        search: Option<String>,

        /// Restrict to one category.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Take the career quiz and get suggestions.
    Quiz,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Print the current session identifier, creating one if needed.
    Show,
    /// Replace the session identifier. Saved history stays with the old one.
    New,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List saved conversations.
    #[command(alias = "ls")]
    List,

    /// Delete one conversation.
    #[command(alias = "rm")]
    Delete {
        /// Conversation ID.
        id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Delete every conversation for this session.
    Clear {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Steady-ticking spinner with a message.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Shorten `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_history_delete() {
        let cli =
            Cli::try_parse_from(["compass", "--json", "history", "rm", "abc", "--force"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::History {
                action: HistoryCommand::Delete { id, force },
            } => {
                assert_eq!(id, "abc");
                assert!(force);
            }
            _ => panic!("expected history delete"),
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("a longer sentence", 10), "a longe...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }
}
