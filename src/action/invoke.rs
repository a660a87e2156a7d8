//! Action invocation.
//!
//! The history entry is written before the handler runs. A handler that fails leaves
//! a `"True"` entry behind; callers that need exact history must record a correction
//! themselves.

use serde::Serialize;

use crate::error::{ActionError, Result};
use crate::store::MemoryStore;

use super::registry::ActionRegistry;
use super::types::Arguments;

pub const NOT_FOUND_MESSAGE: &str = "Action not found";

/// Result of [`ActionRegistry::invoke`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InvokeOutcome {
    /// The handler ran and returned `result`.
    Success { result: serde_json::Value },
    /// No action with the requested name is registered.
    NotFound { response: String },
}

impl InvokeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn result(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Success { result } => Some(result),
            Self::NotFound { .. } => None,
        }
    }
}

impl<S: MemoryStore> ActionRegistry<S> {
    /// Run `name` with `arguments`.
    ///
    /// Unknown names are recorded as failed attempts and reported as
    /// [`InvokeOutcome::NotFound`]. Store and handler faults propagate.
    pub fn invoke(&self, name: &str, arguments: &Arguments) -> Result<InvokeOutcome> {
        let Some(action) = self.actions.get(name) else {
            self.record_history(name, arguments, false)?;
            tracing::warn!(action = name, "invoke of unknown action");
            return Ok(InvokeOutcome::NotFound {
                response: NOT_FOUND_MESSAGE.to_string(),
            });
        };

        self.record_history(name, arguments, true)?;

        tracing::info!(action = name, "invoking action");
        let result = action
            .handler
            .invoke(arguments)
            .map_err(|source| ActionError::Handler {
                name: name.to_string(),
                source,
            })?;

        Ok(InvokeOutcome::Success { result })
    }
}
