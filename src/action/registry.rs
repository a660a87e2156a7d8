//! The action catalog.
//!
//! [`ActionRegistry`] owns the in-process name → [`Action`] map and the store handle.
//! Every catalog write is mirrored into the store's `actions` category so actions can
//! be found by text search; reads are served from the map alone.

use std::collections::HashMap;

use crate::error::{ActionError, Result};
use crate::store::{MemoryRecord, MemoryStore, Metadata};

use super::history::{self, HistoryEntry, SuccessFlag};
use super::types::{Action, Arguments};

/// Store category holding the searchable action mirror.
pub const ACTIONS_CATEGORY: &str = "actions";

/// Catalog of actions plus the store that mirrors it and holds execution history.
pub struct ActionRegistry<S: MemoryStore> {
    pub(crate) actions: HashMap<String, Action>,
    pub(crate) store: S,
}

impl<S: MemoryStore> ActionRegistry<S> {
    /// An empty catalog over `store`. Existing mirror documents in the store are not
    /// loaded; the catalog is rebuilt by registering actions.
    pub fn new(store: S) -> Self {
        Self {
            actions: HashMap::new(),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Insert or overwrite `name` and mirror its schema fragment to the store.
    pub fn add(&mut self, name: impl Into<String>, action: Action) -> Result<()> {
        let name = name.into();

        let document = mirror_document(&name, action.description());
        let metadata = mirror_metadata(&name, &action)?;
        self.store
            .create(ACTIONS_CATEGORY, &document, &metadata, Some(name.as_str()))
            .map_err(ActionError::Store)?;

        let replaced = self.actions.insert(name.clone(), action).is_some();
        tracing::info!(action = %name, replaced, "action registered");
        Ok(())
    }

    /// Register an action under its own function name.
    pub fn register(&mut self, action: Action) -> Result<()> {
        let name = action.name().to_string();
        self.add(name, action)
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Remove `name` from the catalog and the store. Returns whether it was registered.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        if !self.actions.contains_key(name) {
            return Ok(false);
        }
        self.store
            .delete(ACTIONS_CATEGORY, name)
            .map_err(ActionError::Store)?;
        self.actions.remove(name);

        tracing::info!(action = name, "action removed");
        Ok(true)
    }

    /// Snapshot of every registered action.
    pub fn all(&self) -> HashMap<String, Action> {
        self.actions.clone()
    }

    /// Registered action names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Wipe the store mirror and empty the catalog.
    pub fn clear(&mut self) -> Result<()> {
        self.store
            .wipe(ACTIONS_CATEGORY)
            .map_err(ActionError::Store)?;
        let dropped = self.actions.len();
        self.actions.clear();

        tracing::info!(dropped, "action catalog cleared");
        Ok(())
    }

    /// The persisted mirror record for `name`, straight from the store.
    pub fn get_from_store(&self, name: &str) -> Result<Option<MemoryRecord>> {
        self.store
            .get(ACTIONS_CATEGORY, name)
            .map_err(ActionError::Store)
    }

    /// Text search over the action mirror, best match first.
    pub fn search(&self, search_text: &str, n_results: usize) -> Result<Vec<MemoryRecord>> {
        self.store
            .search(ACTIONS_CATEGORY, search_text, n_results)
            .map_err(ActionError::Store)
    }

    /// Append an entry to the execution history.
    pub fn record_history(
        &self,
        name: &str,
        arguments: &Arguments,
        success: impl Into<SuccessFlag>,
    ) -> Result<String> {
        history::record(&self.store, name, arguments, success)
    }

    /// Up to `n` most recent history entries, newest first.
    pub fn history(&self, n: usize) -> Result<Vec<HistoryEntry>> {
        history::recent(&self.store, n)
    }

    /// Name of the last attempted action.
    pub fn last_action(&self) -> Result<Option<String>> {
        history::last(&self.store)
    }
}

/// Searchable document text for an action: `"<name> - <description>"`.
pub(crate) fn mirror_document(name: &str, description: &str) -> String {
    format!("{name} - {description}")
}

/// Store metadata for an action: its name and the JSON-encoded function spec.
pub(crate) fn mirror_metadata(name: &str, action: &Action) -> Result<Metadata> {
    let mut metadata = Metadata::new();
    metadata.insert("name".to_string(), serde_json::Value::String(name.to_string()));
    metadata.insert(
        "function".to_string(),
        serde_json::Value::String(serde_json::to_string(&action.function)?),
    );
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use serde_json::json;

    fn noop(_: &Arguments) -> anyhow::Result<serde_json::Value> {
        Ok(json!(null))
    }

    fn registry() -> ActionRegistry<SqliteStore> {
        ActionRegistry::new(SqliteStore::open_in_memory().unwrap())
    }

    #[test]
    fn add_mirrors_document_and_metadata() {
        let mut reg = registry();
        let action = Action::new("test", "A test action", noop);
        reg.add("test", action.clone()).unwrap();

        let record = reg.get_from_store("test").unwrap().unwrap();
        assert_eq!(record.id, "test");
        assert_eq!(record.document, "test - A test action");
        assert_eq!(record.metadata["name"], "test");

        let function: crate::action::FunctionSpec =
            serde_json::from_str(record.metadata["function"].as_str().unwrap()).unwrap();
        assert_eq!(function, action.function);
    }

    #[test]
    fn remove_unknown_is_false_and_leaves_store_alone() {
        let mut reg = registry();
        reg.add("keep", Action::new("keep", "Keep me", noop)).unwrap();
        assert!(!reg.remove("missing").unwrap());
        assert_eq!(reg.store().count(ACTIONS_CATEGORY).unwrap(), 1);
    }

    #[test]
    fn names_are_sorted() {
        let mut reg = registry();
        for name in ["b", "c", "a"] {
            reg.register(Action::new(name, "x", noop)).unwrap();
        }
        assert_eq!(reg.names(), vec!["a", "b", "c"]);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn registry_over_borrowed_store() {
        let store = SqliteStore::open_in_memory().unwrap();
        {
            let mut reg = ActionRegistry::new(&store);
            reg.register(Action::new("shared", "Shared store", noop)).unwrap();
        }
        assert_eq!(store.count(ACTIONS_CATEGORY).unwrap(), 1);
    }
}
