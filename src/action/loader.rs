//! Bulk registration of actions from providers.
//!
//! An [`ActionProvider`] hands the registry a batch of actions; hosts register their
//! providers explicitly at startup via [`ActionRegistry::import_from`].
//! [`DirectoryProvider`] reads definition files from a directory and binds each
//! definition to a handler looked up by name in a [`HandlerTable`].

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::error::{ActionError, Result};
use crate::store::MemoryStore;

use super::prompt::PromptTemplate;
use super::registry::ActionRegistry;
use super::types::{Action, ActionDefinition, ActionHandler, FunctionSpec};

/// A source of actions.
pub trait ActionProvider {
    /// Identifies the provider in logs and errors.
    fn name(&self) -> &str;

    /// Produce the provider's actions. An empty list is valid.
    fn actions(&self) -> anyhow::Result<Vec<Action>>;
}

impl<S: MemoryStore> ActionRegistry<S> {
    /// Register every action produced by `providers`, in order. Later registrations
    /// overwrite earlier ones with the same name. Returns the number of actions added.
    ///
    /// The first provider failure aborts the import; actions registered before it stay.
    pub fn import_from(&mut self, providers: &[&dyn ActionProvider]) -> Result<usize> {
        let mut added = 0;
        for provider in providers {
            added += self.import(*provider)?;
        }
        Ok(added)
    }

    /// Register every action produced by a single provider.
    pub fn import<P: ActionProvider + ?Sized>(&mut self, provider: &P) -> Result<usize> {
        let actions = provider.actions().map_err(|source| {
            // Definition errors raised by the provider keep their own variant
            match source.downcast::<ActionError>() {
                Ok(err) => err,
                Err(source) => ActionError::Provider {
                    provider: provider.name().to_string(),
                    source,
                },
            }
        })?;

        let count = actions.len();
        for action in actions {
            if action.name().trim().is_empty() {
                return Err(ActionError::invalid(
                    provider.name(),
                    "action with empty function.name",
                ));
            }
            self.register(action)?;
        }

        tracing::info!(provider = provider.name(), count, "actions imported");
        Ok(count)
    }
}

/// Handlers available to definition files, keyed by the name files refer to.
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<String, Arc<dyn ActionHandler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, handler: impl ActionHandler + 'static) -> Self {
        self.insert(name, handler);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, handler: impl ActionHandler + 'static) {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ActionHandler>> {
        self.handlers.get(name).cloned()
    }
}

/// File extensions [`DirectoryProvider`] reads.
pub const DEFINITION_EXTENSIONS: &[&str] = &["json", "toml"];

/// Top level of a definition file. Files without `actions` contribute nothing.
#[derive(Debug, Deserialize)]
struct DefinitionFile {
    actions: Option<Vec<FileAction>>,
}

#[derive(Debug, Deserialize)]
struct FileAction {
    function: FunctionSpec,
    /// Key into the [`HandlerTable`].
    handler: String,
    #[serde(default)]
    suggestion_after_actions: Vec<String>,
    #[serde(default)]
    never_after_actions: Vec<String>,
    #[serde(default)]
    prompt: Option<String>,
}

/// Loads actions from `*.json` and `*.toml` definition files in one directory.
///
/// A JSON definition file looks like:
///
/// ```json
/// {
///   "actions": [
///     {
///       "function": { "name": "summarize", "description": "Summarize text",
///                     "parameters": { "type": "object", "properties": {} } },
///       "handler": "summarize",
///       "suggestion_after_actions": ["save_note"],
///       "never_after_actions": []
///     }
///   ]
/// }
/// ```
pub struct DirectoryProvider {
    dir: PathBuf,
    handlers: HandlerTable,
    label: String,
}

impl DirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>, handlers: HandlerTable) -> Self {
        let dir = dir.into();
        let label = dir.display().to_string();
        Self {
            dir,
            handlers,
            label,
        }
    }

    /// Parse every definition file, in file-name order.
    pub fn load(&self) -> anyhow::Result<Vec<Action>> {
        let dir = std::fs::canonicalize(&self.dir)
            .with_context(|| format!("failed to resolve action directory {}", self.dir.display()))?;

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
            .with_context(|| format!("failed to read action directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_definition_file(path))
            .collect();
        paths.sort();

        let mut actions = Vec::new();
        for path in paths {
            let loaded = self.load_file(&path)?;
            tracing::debug!(file = %path.display(), count = loaded.len(), "definition file loaded");
            actions.extend(loaded);
        }
        Ok(actions)
    }

    fn load_file(&self, path: &Path) -> anyhow::Result<Vec<Action>> {
        let origin = path.display().to_string();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read definition file {origin}"))?;

        let parsed: DefinitionFile = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&contents)
                .map_err(|e| ActionError::invalid(&origin, e.to_string()))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| ActionError::invalid(&origin, e.to_string()))?,
        };

        let Some(entries) = parsed.actions else {
            tracing::debug!(file = %origin, "no actions list, skipping");
            return Ok(Vec::new());
        };

        let mut actions = Vec::with_capacity(entries.len());
        for entry in entries {
            let handler = self.handlers.get(&entry.handler).ok_or_else(|| {
                ActionError::invalid(
                    &origin,
                    format!(
                        "unknown handler `{}` for action `{}`",
                        entry.handler, entry.function.name
                    ),
                )
            })?;

            let definition = ActionDefinition {
                function: entry.function,
                suggestion_after_actions: entry.suggestion_after_actions,
                never_after_actions: entry.never_after_actions,
            };
            let mut action = definition.into_action(handler);
            if let Some(template) = entry.prompt {
                action = action.with_prompt(PromptTemplate::new(template));
            }
            actions.push(action);
        }
        Ok(actions)
    }
}

impl ActionProvider for DirectoryProvider {
    fn name(&self) -> &str {
        &self.label
    }

    fn actions(&self) -> anyhow::Result<Vec<Action>> {
        self.load()
    }
}

fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| DEFINITION_EXTENSIONS.contains(&ext))
}
