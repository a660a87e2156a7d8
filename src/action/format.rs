//! Prompt-ready rendering of available actions.

use serde::Serialize;

use crate::error::Result;
use crate::store::MemoryStore;

use super::recommend::Candidate;
use super::registry::ActionRegistry;

/// Number of search results considered by [`ActionRegistry::formatted`].
pub const FORMATTED_RESULTS: usize = 5;

pub const FORMATTED_HEADER: &str = "Available actions for me to choose from:";
pub const SHORT_LABEL: &str = "Available actions (name):";
const RECOMMENDED_PREFIX: &str = "(recommended) ";

/// Available actions in three renderings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedActions {
    /// Candidates, recommended first.
    pub available: Vec<Candidate>,
    /// Header line followed by one line per candidate.
    pub formatted: String,
    /// Label followed by comma-separated action names.
    pub short: String,
}

impl FormattedActions {
    /// Render `candidates`, moving recommended ones to the front while keeping the
    /// relative order within each group.
    pub fn from_candidates(mut candidates: Vec<Candidate>) -> Self {
        candidates.sort_by_key(|c| !c.recommended);

        let mut lines = Vec::with_capacity(candidates.len() + 1);
        lines.push(FORMATTED_HEADER.to_string());
        for candidate in &candidates {
            if candidate.recommended {
                lines.push(format!("{RECOMMENDED_PREFIX}{}", candidate.document));
            } else {
                lines.push(candidate.document.clone());
            }
        }

        let short = if candidates.is_empty() {
            SHORT_LABEL.to_string()
        } else {
            let names: Vec<&str> = candidates.iter().map(Candidate::name).collect();
            format!("{SHORT_LABEL} {}", names.join(", "))
        };

        Self {
            formatted: lines.join("\n"),
            short,
            available: candidates,
        }
    }
}

impl<S: MemoryStore> ActionRegistry<S> {
    /// Chained recommendations for `search_text`, rendered for a prompt.
    pub fn formatted(&self, search_text: &str) -> Result<FormattedActions> {
        let candidates = self.available(search_text, FORMATTED_RESULTS, true)?;
        Ok(FormattedActions::from_candidates(candidates))
    }
}
