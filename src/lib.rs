//! Action registry for agents — named, schema-described operations with
//! history-aware recommendations.
//!
//! An agent registers [`Action`](action::Action)s (a function spec for the LLM, a
//! handler, and chaining rules), invokes them by name, and asks which actions to
//! offer next. Action definitions and execution history are persisted in a
//! [`MemoryStore`](store::MemoryStore); the bundled [`SqliteStore`](store::SqliteStore)
//! uses SQLite with FTS5 for ranked text search.
//!
//! ```no_run
//! use agentaction::action::{handler_fn, Action, ActionRegistry, Arguments};
//! use agentaction::store::SqliteStore;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut registry = ActionRegistry::new(SqliteStore::open_in_memory()?);
//! registry.register(
//!     Action::new("search_web", "Search the web", handler_fn(|args| Ok(json!({ "query": args.get("q") }))))
//!         .suggest_after(["summarize"]),
//! )?;
//! registry.invoke("search_web", &Arguments::new())?;
//! let offer = registry.formatted("find something online")?;
//! println!("{}", offer.formatted);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`action`] — Catalog, history, recommendations, invocation, and loaders
//! - [`store`] — The memory store contract and the SQLite adapter
//! - [`db`] — SQLite database initialization and schema
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`error`] — Library error type

pub mod action;
pub mod config;
pub mod db;
pub mod error;
pub mod store;

pub use error::{ActionError, Result};
