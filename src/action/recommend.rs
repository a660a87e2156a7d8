//! Recommendation of the next action.
//!
//! Candidates are seeded from a text search over the action mirror, then adjusted by
//! the chaining rules of the last attempted action: its `suggestion_after` entries are
//! appended and flagged as recommended, its `never_after` entries are dropped.
//! Actions are identified by name throughout.

use serde::Serialize;
use std::collections::HashSet;

use crate::error::Result;
use crate::store::{MemoryRecord, MemoryStore, Metadata};

use super::registry::{mirror_document, mirror_metadata, ActionRegistry};
use super::types::FunctionSpec;

/// An action offered as a next step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Action name; also the mirror document id.
    pub id: String,
    /// `"<name> - <description>"`.
    pub document: String,
    pub metadata: Metadata,
    /// Set when the action was added because the previous action suggests it.
    pub recommended: bool,
}

impl Candidate {
    /// Action name, preferring the `name` metadata field.
    pub fn name(&self) -> &str {
        self.metadata
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or(&self.id)
    }

    /// Decode the function spec carried in metadata, if present and well formed.
    pub fn function(&self) -> Option<FunctionSpec> {
        let raw = self.metadata.get("function")?.as_str()?;
        serde_json::from_str(raw).ok()
    }
}

impl From<MemoryRecord> for Candidate {
    fn from(record: MemoryRecord) -> Self {
        Self {
            id: record.id,
            document: record.document,
            metadata: record.metadata,
            recommended: false,
        }
    }
}

impl<S: MemoryStore> ActionRegistry<S> {
    /// Actions to offer for `search_text`.
    ///
    /// With `chain` off, or without a prior action in history, this is the search
    /// result as-is. Ordering is left to the caller; see
    /// [`formatted`](ActionRegistry::formatted) for the presentation order.
    pub fn available(
        &self,
        search_text: &str,
        n_results: usize,
        chain: bool,
    ) -> Result<Vec<Candidate>> {
        let mut candidates: Vec<Candidate> = self
            .search(search_text, n_results)?
            .into_iter()
            .map(Candidate::from)
            .collect();

        if !chain {
            return Ok(candidates);
        }

        let Some(last) = self.last_action()? else {
            return Ok(candidates);
        };

        let Some(previous) = self.actions.get(&last) else {
            tracing::debug!(action = %last, "last action not in catalog, no chaining");
            return Ok(candidates);
        };

        let mut present: HashSet<String> = candidates.iter().map(|c| c.id.clone()).collect();

        for name in &previous.suggestion_after {
            if present.contains(name) {
                continue;
            }
            let Some(action) = self.actions.get(name) else {
                tracing::warn!(
                    after = %last,
                    suggested = %name,
                    "suggested action is not registered, skipping"
                );
                continue;
            };
            candidates.push(Candidate {
                id: name.clone(),
                document: mirror_document(name, action.description()),
                metadata: mirror_metadata(name, action)?,
                recommended: true,
            });
            present.insert(name.clone());
        }

        // Names no longer in the catalog are ignored, like stale suggestions
        candidates.retain(|c| {
            !(previous.never_after.contains(&c.id) && self.actions.contains_key(&c.id))
        });

        tracing::debug!(
            after = %last,
            candidates = candidates.len(),
            "recommendations applied"
        );
        Ok(candidates)
    }
}
