//! Search execution across several queries

use super::adapter::SearchAdapter;
use super::models::SearchRequest;
use crate::error::SearchError;
use crate::results::ResultSet;
use futures::future::join_all;
use tracing::{debug, info};

/// Runs a batch of queries, one adapter per query, and caps the total
pub struct Search {
    adapter: SearchAdapter,
}

impl Search {
    /// Create a new search executor
    pub fn new(adapter: SearchAdapter) -> Self {
        Self { adapter }
    }

    /// Execute all queries concurrently.
    ///
    /// Results keep request order, then backend order, and are truncated to
    /// the configured total. The first failing query, in request order,
    /// fails the whole batch.
    pub async fn execute(&self, requests: &[SearchRequest]) -> Result<ResultSet, SearchError> {
        let mut adapters = Vec::new();
        for request in requests {
            if request.is_empty() {
                debug!("Skipping empty query");
                continue;
            }
            adapters.push((self.adapter.copy()?, request));
        }

        info!(
            "Executing {} queries against {}",
            adapters.len(),
            self.adapter.endpoint()
        );

        let outcomes = join_all(
            adapters
                .iter()
                .map(|(adapter, request)| adapter.search(request)),
        )
        .await;

        let mut combined = ResultSet::new();
        for outcome in outcomes {
            combined.extend(outcome?);
        }
        combined.truncate(self.adapter.max_results_total() as usize);

        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_empty_batch() {
        let settings = Settings::default().with_endpoint("http://127.0.0.1:1/solr/core");
        let search = Search::new(SearchAdapter::new(&settings).unwrap());

        let requests = vec![SearchRequest::new(""), SearchRequest::new("   ")];
        let results = tokio_test::block_on(search.execute(&requests)).unwrap();

        assert!(results.is_empty());
    }
}
