use anyhow::Result;

use agentaction::action::history::{self, HISTORY_CATEGORY};
use agentaction::action::ACTIONS_CATEGORY;
use agentaction::config::AgentActionConfig;
use agentaction::db::schema;
use agentaction::store::MemoryStore;

/// Display store statistics in the terminal.
pub fn stats(config: &AgentActionConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let store = super::open_store(config)?;

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    println!("Action Store Statistics");
    println!("{}", "=".repeat(40));
    println!("  Database:            {}", db_path.display());
    println!("  Size:                {} bytes", file_size);
    println!(
        "  Schema version:      {}",
        schema::get_schema_version(store.connection())?
    );
    println!();
    println!("  Actions:             {}", store.count(ACTIONS_CATEGORY)?);
    println!("  History entries:     {}", store.count(HISTORY_CATEGORY)?);

    if let Some(last) = history::last(&store)? {
        println!("  Last action:         {last}");
    }

    Ok(())
}
