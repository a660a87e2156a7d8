//! CLI `reset` command — delete stored actions and history after confirmation.

use anyhow::{bail, Result};
use std::io::Write;

use agentaction::action::history::HISTORY_CATEGORY;
use agentaction::action::ACTIONS_CATEGORY;
use agentaction::config::AgentActionConfig;
use agentaction::store::MemoryStore;

/// Wipe the action mirror and the execution history.
pub fn reset(config: &AgentActionConfig, skip_confirm: bool) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !skip_confirm {
        println!("WARNING: This will permanently delete ALL stored actions and history.");
        println!("Database: {}", db_path.display());
        print!("\nType YES to confirm: ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if input.trim() != "YES" {
            bail!("reset cancelled");
        }
    }

    let store = super::open_store(config)?;
    store.wipe(ACTIONS_CATEGORY)?;
    store.wipe(HISTORY_CATEGORY)?;

    println!("Store reset complete.");
    Ok(())
}
