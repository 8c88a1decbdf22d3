//! Search report structures handed to the formatters

use crate::processing::job::ScoredJob;
use crate::processing::query_parser::ParsedQuery;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Relevance ranking against a non-empty query
    Ranked,
    /// Newest-first listing, no scoring
    Browse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub query: ParsedQuery,
    pub mode: SearchMode,
    pub total_candidates: usize,
    pub results: Vec<ScoredJob>,
    pub generated_at: DateTime<Utc>,
}

impl SearchReport {
    pub fn new(query: ParsedQuery, total_candidates: usize, results: Vec<ScoredJob>) -> Self {
        let mode = if query.is_empty() {
            SearchMode::Browse
        } else {
            SearchMode::Ranked
        };

        Self {
            query,
            mode,
            total_candidates,
            results,
            generated_at: Utc::now(),
        }
    }

    pub fn best_score(&self) -> Option<f32> {
        self.results.first().map(|r| r.score)
    }
}
