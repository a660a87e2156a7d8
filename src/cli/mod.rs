//! Terminal commands over a persisted store.
//!
//! Handlers live in the host process, so these commands only read or wipe what the
//! store holds: the action mirror and the execution history.

pub mod actions;
pub mod history;
pub mod reset;
pub mod search;
pub mod stats;

use anyhow::Result;

use agentaction::config::AgentActionConfig;
use agentaction::store::SqliteStore;

/// Open the configured store.
fn open_store(config: &AgentActionConfig) -> Result<SqliteStore> {
    SqliteStore::open(config.resolved_db_path())
}

/// Shorten `text` to `max` characters, marking the cut with `...`.
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("ééééé", 3), "ééé...");
    }
}
