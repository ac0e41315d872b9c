//! HTTP client for making requests to search backends

use crate::config::OutgoingSettings;
use crate::engines::{EngineRequest, EngineResponse};
use anyhow::Result;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client wrapper configured from the outgoing settings
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let timeout = request_timeout(settings.request_timeout)?;
        let mut builder = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("solr-miner/", env!("CARGO_PKG_VERSION")))
            .gzip(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// Execute an engine request
    pub async fn execute(&self, request: EngineRequest) -> Result<EngineResponse> {
        let mut req_builder = self.client.get(&request.url);

        for (key, value) in self.extra_headers.iter().chain(request.headers.iter()) {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Parse response into EngineResponse
    async fn parse_response(response: Response) -> Result<EngineResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(EngineResponse { status, text })
    }
}

/// Request timeout in seconds as a `Duration`; must be finite and positive
fn request_timeout(seconds: f64) -> Result<Duration> {
    if seconds.is_nan() || seconds <= 0.0 {
        return Err(anyhow::anyhow!(
            "request_timeout must be a positive number of seconds, got {}",
            seconds
        ));
    }
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| anyhow::anyhow!("invalid request_timeout {}: {}", seconds, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::with_settings(&OutgoingSettings::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_bad_proxy_rejected() {
        let mut settings = OutgoingSettings::default();
        settings.proxies.all = Some("not a proxy url".to_string());
        assert!(HttpClient::with_settings(&settings).is_err());
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        let settings = OutgoingSettings {
            request_timeout: 0.5,
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        let request = EngineRequest::get("http://127.0.0.1:1/select");
        assert!(client.execute(request).await.is_err());
    }

    #[test]
    fn test_request_timeout_bounds() {
        assert_eq!(request_timeout(2.5).unwrap(), Duration::from_millis(2500));
        for seconds in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e300] {
            assert!(request_timeout(seconds).is_err(), "{} accepted", seconds);
        }
    }
}
