//! Action catalog, execution history, recommendations, invocation, and loading.
//!
//! Everything hangs off [`ActionRegistry`], which owns the catalog map and a
//! [`MemoryStore`](crate::store::MemoryStore) handle. Operations are split by concern:
//!
//! - [`registry`] — add / get / remove / clear, mirrored to the `actions` category
//! - [`history`] — append-only log in the `action_history` category
//! - [`recommend`] — search-seeded candidates adjusted by chaining rules
//! - [`format`] — prompt-ready rendering of candidates
//! - [`invoke`] — handler dispatch with history recording
//! - [`loader`] — bulk registration from providers and definition directories

pub mod format;
pub mod history;
pub mod invoke;
pub mod loader;
pub mod prompt;
pub mod recommend;
pub mod registry;
pub mod types;

pub use format::FormattedActions;
pub use history::{HistoryEntry, SuccessFlag};
pub use invoke::InvokeOutcome;
pub use loader::{ActionProvider, DirectoryProvider, HandlerTable};
pub use prompt::PromptTemplate;
pub use recommend::Candidate;
pub use registry::{ActionRegistry, ACTIONS_CATEGORY};
pub use types::{handler_fn, Action, ActionDefinition, ActionHandler, Arguments, FunctionSpec};
