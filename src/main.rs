mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use agentaction::config::AgentActionConfig;

#[derive(Parser)]
#[command(name = "agentaction", version, about = "Inspect a persisted agent action store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List action definitions mirrored into the store
    Actions,
    /// Search stored actions by text
    Search {
        query: String,
        /// Maximum number of results (defaults to recommendation.max_results)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show the most recent action invocations, newest first
    History {
        /// Number of entries (defaults to recommendation.history_window)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show store statistics
    Stats,
    /// Delete all stored actions and history
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AgentActionConfig::load()?;

    // Log to stderr so stdout carries only command output
    let filter = EnvFilter::try_new(&config.logging.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Actions => cli::actions::actions(&config)?,
        Command::Search { query, limit } => cli::search::search(&config, &query, limit)?,
        Command::History { limit } => cli::history::history(&config, limit)?,
        Command::Stats => cli::stats::stats(&config)?,
        Command::Reset { yes } => cli::reset::reset(&config, yes)?,
    }

    Ok(())
}
