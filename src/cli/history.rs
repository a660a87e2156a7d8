//! CLI `history` command — show recent invocations.

use anyhow::Result;

use agentaction::action::history;
use agentaction::config::AgentActionConfig;

/// Print the most recent history entries, newest first.
pub fn history(config: &AgentActionConfig, limit: Option<usize>) -> Result<()> {
    let store = super::open_store(config)?;
    let limit = limit.unwrap_or(config.recommendation.history_window);

    let entries = history::recent(&store, limit)?;
    if entries.is_empty() {
        println!("No history recorded.");
        return Ok(());
    }

    for entry in entries {
        let mut arguments = entry.arguments;
        arguments.remove("success");
        let arguments = serde_json::Value::Object(arguments).to_string();
        println!(
            "  {} [{}] {} {}",
            entry.created_at,
            entry.success,
            entry.action,
            super::preview(&arguments, 80)
        );
    }

    Ok(())
}
