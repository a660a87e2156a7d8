//! Error types for the action registry.
//!
//! A missing action is not an error: [`invoke`](crate::action::ActionRegistry::invoke)
//! reports it as a value. Everything here is a fault that propagates to the caller.

/// Errors raised by registry, history, and loader operations.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The memory store rejected or failed an operation.
    #[error("memory store error: {0:#}")]
    Store(#[source] anyhow::Error),

    /// An action handler returned an error while executing.
    #[error("handler for action `{name}` failed: {source:#}")]
    Handler {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// An [`ActionProvider`](crate::action::loader::ActionProvider) could not produce its actions.
    #[error("action provider `{provider}` failed: {source:#}")]
    Provider {
        provider: String,
        #[source]
        source: anyhow::Error,
    },

    /// A definition file or action record is malformed.
    #[error("invalid action definition in {origin}: {reason}")]
    InvalidDefinition { origin: String, reason: String },

    /// Action metadata could not be (de)serialized.
    #[error("action metadata serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ActionError {
    pub(crate) fn invalid(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T, E = ActionError> = std::result::Result<T, E>;
