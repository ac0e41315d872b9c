//! Search adapter: one query in, normalized results out

use super::models::SearchRequest;
use super::retry::RetryPolicy;
use crate::config::{self, OutgoingSettings, Settings};
use crate::engines::{Engine, EngineLoader, EngineResults, RequestParams};
use crate::error::SearchError;
use crate::network::HttpClient;
use crate::results::ResultSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use url::Url;

/// Runs queries against one configured backend, retrying transient failures.
///
/// The endpoint is resolved once, at construction. An adapter serves one
/// caller at a time; concurrent searches use one adapter each (see [`copy`]).
///
/// [`copy`]: SearchAdapter::copy
pub struct SearchAdapter {
    endpoint: String,
    engine: Arc<dyn Engine>,
    client: HttpClient,
    outgoing: OutgoingSettings,
    retry: RetryPolicy,
    max_results_per_query: u32,
    max_results_total: u32,
}

impl SearchAdapter {
    /// Create an adapter from settings
    pub fn new(settings: &Settings) -> Result<Self, SearchError> {
        let endpoint = resolve_endpoint(settings.engine.endpoint.as_deref())?;
        let engine = EngineLoader::create(&settings.engine, &endpoint)
            .map_err(|e| SearchError::configuration(e.to_string()))?;
        Self::with_engine(settings, endpoint, engine)
    }

    /// Create an adapter from the process-wide settings
    pub fn from_config() -> Result<Self, SearchError> {
        let settings =
            config::get().ok_or_else(|| SearchError::configuration("settings not initialized"))?;
        Self::new(settings)
    }

    /// Create an adapter around an already built engine
    pub fn with_engine(
        settings: &Settings,
        endpoint: impl Into<String>,
        engine: Arc<dyn Engine>,
    ) -> Result<Self, SearchError> {
        let client = HttpClient::with_settings(&settings.outgoing)
            .map_err(|e| SearchError::configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            engine,
            client,
            outgoing: settings.outgoing.clone(),
            retry: RetryPolicy::from_settings(&settings.search),
            max_results_per_query: settings.search.max_results_per_query.max(1),
            max_results_total: settings.search.max_results_total.max(1),
        })
    }

    /// A fresh adapter with the same configuration and its own connection
    pub fn copy(&self) -> Result<Self, SearchError> {
        let client = HttpClient::with_settings(&self.outgoing)
            .map_err(|e| SearchError::configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: self.endpoint.clone(),
            engine: self.engine.clone(),
            client,
            outgoing: self.outgoing.clone(),
            retry: self.retry,
            max_results_per_query: self.max_results_per_query,
            max_results_total: self.max_results_total,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn max_results_per_query(&self) -> u32 {
        self.max_results_per_query
    }

    pub fn max_results_total(&self) -> u32 {
        self.max_results_total
    }

    /// Run one query, retrying until it succeeds or the retry budget is spent
    pub async fn search(&self, request: &SearchRequest) -> Result<ResultSet, SearchError> {
        let rows = request.max_results.clamp(1, self.max_results_per_query);
        let params = RequestParams::new(request.query.clone(), rows);
        let start = Instant::now();

        let mut attempts = 0u32;
        let engine_results = loop {
            attempts += 1;
            match self.attempt(&params).await {
                Ok(results) => break results,
                Err(e) => {
                    warn!(
                        "Search attempt {}/{} against {} failed: {}",
                        attempts,
                        self.retry.max_attempts(),
                        self.endpoint,
                        e
                    );
                    if !self.retry.should_retry(attempts) {
                        error!(
                            "Search failed after {} attempts against {}",
                            attempts, self.endpoint
                        );
                        return Err(SearchError::Exhausted {
                            endpoint: self.endpoint.clone(),
                            attempts,
                            last_error: e.to_string(),
                        });
                    }
                    tokio::time::sleep(self.retry.delay).await;
                }
            }
        };

        if engine_results.skipped_malformed > 0 {
            debug!(
                "Skipped {} documents without URL for '{}'",
                engine_results.skipped_malformed, request.query
            );
        }

        let num_found = engine_results
            .num_found
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        let results: ResultSet = engine_results
            .results
            .into_iter()
            .take(rows as usize)
            .collect();

        info!(
            "Query '{}' returned {} of {} matching documents in {:?} ({} attempts)",
            request.query,
            results.len(),
            num_found,
            start.elapsed(),
            attempts
        );

        Ok(results)
    }

    async fn attempt(&self, params: &RequestParams) -> anyhow::Result<EngineResults> {
        let request = self.engine.request(params)?;
        let response = self.client.execute(request).await?;
        self.engine.response(response)
    }
}

/// Validate the configured endpoint: present, parseable, http(s), and a
/// plain base URL that request paths can be appended to
fn resolve_endpoint(endpoint: Option<&str>) -> Result<String, SearchError> {
    let endpoint = endpoint
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| {
            SearchError::configuration("no search endpoint configured (set SOLR_ENDPOINT)")
        })?;

    let url = Url::parse(endpoint).map_err(|e| {
        SearchError::configuration(format!("malformed endpoint '{}': {}", endpoint, e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SearchError::configuration(format!(
            "endpoint '{}' must use http or https",
            endpoint
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(SearchError::configuration(format!(
            "endpoint '{}' must not carry a query string or fragment",
            endpoint
        )));
    }

    Ok(endpoint.trim_end_matches('/').to_string())
}
