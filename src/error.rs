//! Errors surfaced by the search adapter

use thiserror::Error;

/// Errors returned to callers of the search adapter.
///
/// Transient backend failures never show up here: they are absorbed by the
/// retry loop until the budget runs out, which yields [`SearchError::Exhausted`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// The adapter could not be constructed from its configuration
    #[error("Invalid search configuration: {reason}")]
    Configuration { reason: String },

    /// Every attempt against the backend failed
    #[error("Search failed: endpoint {endpoint} did not answer after {attempts} attempts (last error: {last_error})")]
    Exhausted {
        endpoint: String,
        attempts: u32,
        last_error: String,
    },
}

impl SearchError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Number of backend attempts made before giving up, if any
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::Exhausted { attempts, .. } => Some(*attempts),
            Self::Configuration { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_message_names_endpoint_and_attempts() {
        let error = SearchError::Exhausted {
            endpoint: "http://localhost:8983/solr/core".to_string(),
            attempts: 51,
            last_error: "connection refused".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("http://localhost:8983/solr/core"));
        assert!(message.contains("51 attempts"));
        assert_eq!(error.attempts(), Some(51));
    }

    #[test]
    fn test_configuration_message() {
        let error = SearchError::configuration("no endpoint configured");
        assert!(error.to_string().contains("no endpoint configured"));
        assert_eq!(error.attempts(), None);
    }
}
