use anyhow::Result;

use agentaction::action::ACTIONS_CATEGORY;
use agentaction::config::AgentActionConfig;
use agentaction::store::MemoryStore;

/// Run a text search over stored actions from the terminal.
pub fn search(config: &AgentActionConfig, query: &str, limit: Option<usize>) -> Result<()> {
    let store = super::open_store(config)?;
    let limit = limit.unwrap_or(config.recommendation.max_results);

    let results = store.search(ACTIONS_CATEGORY, query, limit)?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", results.len());
    for (i, record) in results.iter().enumerate() {
        println!("  {}. {}", i + 1, record.id);
        println!("     {}", super::preview(&record.document, 120));
        println!();
    }

    Ok(())
}
