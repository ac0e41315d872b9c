//! Settings structures for Solr-Miner configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Maximum number of search results per query
pub const MAX_RESULTS_PERQUERY: u32 = 10;

/// Maximum total number of search results across all queries
pub const MAX_RESULTS_TOTAL: u32 = 100;

/// Number of retries if a search fails
pub const RETRIES: u32 = 50;

/// Delay between two attempts in milliseconds
pub const RETRY_DELAY_MS: u64 = 1000;

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub engine: EngineConfig,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("SOLR_MINER_DEBUG") {
            match parse_flag(&val) {
                Some(debug) => self.general.debug = debug,
                None => warn!("Ignoring SOLR_MINER_DEBUG={:?}: not a boolean", val),
            }
        }
        if let Ok(val) = std::env::var("SOLR_ENDPOINT") {
            self.engine.endpoint = Some(val);
        }
        if let Ok(val) = std::env::var("SOLR_MINER_RETRIES") {
            if let Ok(retries) = val.parse() {
                self.search.retries = retries;
            }
        }
        if let Ok(val) = std::env::var("SOLR_MINER_RETRY_DELAY_MS") {
            if let Ok(delay) = val.parse() {
                self.search.retry_delay_ms = delay;
            }
        }
    }

    /// Set the search endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.engine.endpoint = Some(endpoint.into());
        self
    }

    /// Set retry count and delay
    pub fn with_retries(mut self, retries: u32, delay: Duration) -> Self {
        self.search.retries = retries;
        self.search.retry_delay_ms = delay.as_millis() as u64;
        self
    }
}

/// Parse a boolean environment value (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`)
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum number of results requested per query
    pub max_results_per_query: u32,
    /// Maximum number of results kept across all queries of one search
    pub max_results_total: u32,
    /// Number of retries after the first failed attempt
    pub retries: u32,
    /// Fixed delay between attempts in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_results_per_query: MAX_RESULTS_PERQUERY,
            max_results_total: MAX_RESULTS_TOTAL,
            retries: RETRIES,
            retry_delay_ms: RETRY_DELAY_MS,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Search backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine module to use
    pub engine: String,
    /// Base URL of the backend (e.g. `http://localhost:8983/solr/core`)
    pub endpoint: Option<String>,
    /// Field matched against the query and returned as snippet
    pub content_field: String,
    /// Field returned as source URL
    pub url_field: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: "solr".to_string(),
            endpoint: None,
            content_field: "content".to_string(),
            url_field: "url".to_string(),
        }
    }
}
