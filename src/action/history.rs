//! Execution history log.
//!
//! Every invocation attempt is appended to the store's `action_history` category with
//! the action name as document text and the arguments (plus a `success` field) as
//! metadata. Entries are never updated; reads come back newest first.

use serde::Serialize;

use crate::error::{ActionError, Result};
use crate::store::{MemoryRecord, MemoryStore};

use super::types::Arguments;

/// Store category holding history entries.
pub const HISTORY_CATEGORY: &str = "action_history";

/// Default number of entries returned by history reads.
pub const DEFAULT_HISTORY_WINDOW: usize = 20;

/// Success marker stored with a history entry.
///
/// Booleans are written as `"True"` / `"False"`; text is stored unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessFlag {
    Bool(bool),
    Text(String),
}

impl SuccessFlag {
    pub fn as_text(&self) -> &str {
        match self {
            Self::Bool(true) => "True",
            Self::Bool(false) => "False",
            Self::Text(s) => s,
        }
    }
}

impl From<bool> for SuccessFlag {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for SuccessFlag {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SuccessFlag {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One recorded invocation attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Name of the action that was attempted.
    pub action: String,
    /// Arguments as recorded, including the `success` field.
    pub arguments: Arguments,
    pub success: String,
    pub created_at: String,
}

impl From<MemoryRecord> for HistoryEntry {
    fn from(record: MemoryRecord) -> Self {
        let success = record
            .metadata
            .get("success")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Self {
            id: record.id,
            action: record.document,
            arguments: record.metadata,
            success,
            created_at: record.created_at,
        }
    }
}

/// Append an entry for `name`. Returns the new entry's id.
pub fn record<S: MemoryStore + ?Sized>(
    store: &S,
    name: &str,
    arguments: &Arguments,
    success: impl Into<SuccessFlag>,
) -> Result<String> {
    let success = success.into();
    let mut metadata = arguments.clone();
    metadata.insert(
        "success".to_string(),
        serde_json::Value::String(success.as_text().to_string()),
    );

    let id = store
        .create(HISTORY_CATEGORY, name, &metadata, None)
        .map_err(ActionError::Store)?;

    tracing::debug!(action = name, success = success.as_text(), "history recorded");
    Ok(id)
}

/// Up to `n` most recent entries, newest first.
pub fn recent<S: MemoryStore + ?Sized>(store: &S, n: usize) -> Result<Vec<HistoryEntry>> {
    let records = store
        .list_recent(HISTORY_CATEGORY, n)
        .map_err(ActionError::Store)?;
    Ok(records.into_iter().map(HistoryEntry::from).collect())
}

/// Name of the most recently recorded action, if any.
pub fn last<S: MemoryStore + ?Sized>(store: &S) -> Result<Option<String>> {
    Ok(recent(store, 1)?.into_iter().next().map(|entry| entry.action))
}
