//! CLI `actions` command — list the persisted action mirror.

use anyhow::Result;

use agentaction::action::{Candidate, ACTIONS_CATEGORY};
use agentaction::config::AgentActionConfig;
use agentaction::store::MemoryStore;

/// Print every action definition mirrored into the store.
pub fn actions(config: &AgentActionConfig) -> Result<()> {
    let store = super::open_store(config)?;

    let total = store.count(ACTIONS_CATEGORY)?;
    if total == 0 {
        println!("No actions stored.");
        return Ok(());
    }

    let mut records = store.list_recent(ACTIONS_CATEGORY, total)?;
    records.sort_by(|a, b| a.id.cmp(&b.id));

    println!("{total} action(s)\n");
    for record in records {
        let candidate = Candidate::from(record);
        println!("  {}", candidate.document);
        if let Some(function) = candidate.function() {
            println!("     parameters: {}", function.parameters);
        }
    }

    Ok(())
}
