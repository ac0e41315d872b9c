//! Search request model

use crate::config::{MAX_RESULTS_PERQUERY, MAX_RESULTS_TOTAL};
use serde::{Deserialize, Serialize};

/// One query to run against the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The query string, matched against the content field as-is
    pub query: String,
    /// Maximum number of results wanted (1..=100)
    pub max_results: u32,
}

impl SearchRequest {
    /// Create a request for the default number of results
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: MAX_RESULTS_PERQUERY,
        }
    }

    /// Set the number of results, clamped to 1..=100
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results.clamp(1, MAX_RESULTS_TOTAL);
        self
    }

    /// Check if query is empty
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }
}
