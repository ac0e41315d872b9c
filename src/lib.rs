//! Solr-Miner: a retrying Solr search adapter
//!
//! Queries a Solr backend for documents matching a query string and turns
//! them into (snippet, source URL) pairs for a question-answering pipeline.

pub mod config;
pub mod engines;
pub mod error;
pub mod network;
pub mod results;
pub mod search;

pub use config::Settings;
pub use engines::Engine;
pub use error::SearchError;
pub use results::{ResultSet, SearchResult};
pub use search::{RetryPolicy, Search, SearchAdapter, SearchRequest};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
