//! Result type definitions

use serde::{Deserialize, Serialize};

/// A single normalized search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Text content of the document, never empty
    pub snippet: String,
    /// URL of the document
    pub source_url: String,
    /// Engine that returned this result
    pub engine: String,
    /// 1-based rank among the results emitted for one query
    pub position: u32,
}

impl SearchResult {
    /// Create a new result
    pub fn new(snippet: String, source_url: String, engine: String) -> Self {
        Self {
            snippet,
            source_url,
            engine,
            position: 0,
        }
    }

    /// Set the position
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }
}

/// Ordered results of one or more queries, in backend order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<SearchResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a result, dropping it if its snippet is blank
    pub fn push(&mut self, result: SearchResult) -> bool {
        if result.snippet.trim().is_empty() {
            return false;
        }
        self.results.push(result);
        true
    }

    /// Append every result of another set, keeping order
    pub fn extend(&mut self, other: ResultSet) {
        self.results.extend(other.results);
    }

    /// Keep at most `len` results
    pub fn truncate(&mut self, len: usize) {
        self.results.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.results.iter()
    }

    /// Snippet/URL pairs in order
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.results
            .iter()
            .map(|r| (r.snippet.as_str(), r.source_url.as_str()))
            .collect()
    }
}

impl IntoIterator for ResultSet {
    type Item = SearchResult;
    type IntoIter = std::vec::IntoIter<SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl FromIterator<SearchResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = SearchResult>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        for result in iter {
            set.push(result);
        }
        set
    }
}
