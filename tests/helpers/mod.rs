#![allow(dead_code)]

use agentaction::action::{Action, ActionRegistry, Arguments};
use agentaction::store::SqliteStore;
use serde_json::{json, Value};

/// A registry over a fresh in-memory store.
pub fn test_registry() -> ActionRegistry<SqliteStore> {
    ActionRegistry::new(SqliteStore::open_in_memory().unwrap())
}

/// Handler that reports success and echoes `input` back as `output`.
pub fn echo(args: &Arguments) -> anyhow::Result<Value> {
    Ok(json!({
        "success": true,
        "output": args.get("input").cloned().unwrap_or(Value::Null),
    }))
}

/// An action with a single string `input` parameter.
pub fn test_action(name: &str, description: &str) -> Action {
    Action::new(name, description, echo).with_parameters(json!({
        "type": "object",
        "properties": {
            "input": { "type": "string", "description": "Some test input" }
        },
        "required": ["input"]
    }))
}

/// Build an argument map from a JSON object literal.
pub fn args(value: Value) -> Arguments {
    value.as_object().cloned().expect("arguments must be a JSON object")
}

/// Names of the given candidates, in order.
pub fn candidate_ids(candidates: &[agentaction::action::Candidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.id.as_str()).collect()
}
