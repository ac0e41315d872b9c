//! Solr search engine implementation

use super::traits::*;
use crate::config::EngineConfig;
use crate::results::SearchResult;
use anyhow::Result as AnyhowResult;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// One raw Solr document: field name to value
pub type SolrDocument = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct SolrReply {
    response: Option<SolrDocumentList>,
    error: Option<SolrErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolrDocumentList {
    num_found: Option<u64>,
    #[serde(default)]
    docs: Vec<SolrDocument>,
}

#[derive(Debug, Deserialize)]
struct SolrErrorBody {
    msg: Option<String>,
    code: Option<u16>,
}

/// Outcome of normalizing one document
enum Normalized {
    Hit { content: String, url: String },
    Empty,
    MissingUrl,
}

/// Solr backend, queried through its JSON `select` handler
pub struct SolrEngine {
    endpoint: String,
    content_field: String,
    url_field: String,
}

impl SolrEngine {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            content_field: "content".to_string(),
            url_field: "url".to_string(),
        }
    }

    fn select_url(&self) -> String {
        format!("{}/select", self.endpoint)
    }

    fn normalize(&self, doc: &SolrDocument) -> Normalized {
        let content = match doc.get(&self.content_field).and_then(field_text) {
            Some(content) if !content.trim().is_empty() => content,
            _ => return Normalized::Empty,
        };
        match doc.get(&self.url_field).and_then(field_text) {
            Some(url) => Normalized::Hit { content, url },
            None => Normalized::MissingUrl,
        }
    }
}

/// Text of a field value; multi-valued fields are joined with a space
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(values) => {
            let parts: Vec<String> = values.iter().filter_map(field_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" "))
            }
        }
        Value::Object(_) => None,
        other => Some(other.to_string()),
    }
}

impl Engine for SolrEngine {
    fn name(&self) -> &str {
        "solr"
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<EngineRequest> {
        let request = EngineRequest::get(self.select_url())
            .header("Accept", "application/json")
            .param("q", format!("{}:{}", self.content_field, params.query))
            .param("rows", params.rows.to_string())
            .param("fl", format!("{},{}", self.content_field, self.url_field))
            .param("wt", "json");

        Ok(request)
    }

    fn response(&self, response: EngineResponse) -> AnyhowResult<EngineResults> {
        if !response.is_success() {
            return Err(anyhow::anyhow!("HTTP error: {}", response.status));
        }

        let reply: SolrReply = response.json()?;

        if let Some(error) = reply.error {
            return Err(anyhow::anyhow!(
                "Solr error {}: {}",
                error.code.unwrap_or(response.status),
                error.msg.unwrap_or_default()
            ));
        }

        let list = reply
            .response
            .ok_or_else(|| anyhow::anyhow!("Solr reply has no document list"))?;

        let mut engine_results = EngineResults::new();
        engine_results.num_found = list.num_found;

        let mut position = 1u32;
        for doc in &list.docs {
            match self.normalize(doc) {
                Normalized::Hit { content, url } => {
                    let result = SearchResult::new(content, url, self.name().to_string())
                        .with_position(position);
                    position += 1;
                    engine_results.add_result(result);
                }
                Normalized::Empty => {}
                Normalized::MissingUrl => {
                    debug!("Skipping Solr document with content but no {}", self.url_field);
                    engine_results.skipped_malformed += 1;
                }
            }
        }

        Ok(engine_results)
    }

    fn init(&mut self, config: &EngineConfig) -> AnyhowResult<()> {
        self.content_field = config.content_field.clone();
        self.url_field = config.url_field.clone();
        Ok(())
    }

    fn validate(&self, config: &EngineConfig) -> AnyhowResult<()> {
        if config.content_field.trim().is_empty() || config.url_field.trim().is_empty() {
            return Err(anyhow::anyhow!("Solr field names must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(body: &str) -> EngineResponse {
        EngineResponse {
            status: 200,
            text: body.to_string(),
        }
    }

    #[test]
    fn test_solr_request() {
        let solr = SolrEngine::new("http://localhost:8983/solr/core/");
        let request = solr
            .request(&RequestParams::new("capital of France", 10))
            .unwrap();

        assert_eq!(request.url, "http://localhost:8983/solr/core/select");
        assert_eq!(request.param_value("q"), Some("content:capital of France"));
        assert_eq!(request.param_value("rows"), Some("10"));
        assert_eq!(request.param_value("fl"), Some("content,url"));
        assert_eq!(request.param_value("wt"), Some("json"));
    }

    #[test]
    fn test_filters_empty_content_in_order() {
        let solr = SolrEngine::new("http://localhost:8983/solr/core");
        let body = r#"{"response":{"numFound":3,"start":0,"docs":[
            {"content":"Paris is the capital of France","url":"http://a"},
            {"content":"","url":"http://b"},
            {"url":"http://d"},
            {"content":null,"url":"http://e"},
            {"content":"France is in Europe","url":"http://c"}
        ]}}"#;

        let results = solr.response(reply(body)).unwrap();
        let pairs: Vec<_> = results
            .results
            .iter()
            .map(|r| (r.snippet.as_str(), r.source_url.as_str(), r.position))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("Paris is the capital of France", "http://a", 1),
                ("France is in Europe", "http://c", 2),
            ]
        );
        assert_eq!(results.num_found, Some(3));
    }

    #[test]
    fn test_whitespace_content_is_dropped() {
        let solr = SolrEngine::new("http://localhost:8983/solr/core");
        let body = r#"{"response":{"docs":[{"content":"   ","url":"http://a"}]}}"#;
        assert!(solr.response(reply(body)).unwrap().is_empty());
    }

    #[test]
    fn test_missing_url_is_skipped() {
        let solr = SolrEngine::new("http://localhost:8983/solr/core");
        let body = r#"{"response":{"docs":[
            {"content":"orphan snippet"},
            {"content":"kept","url":"http://kept"}
        ]}}"#;

        let results = solr.response(reply(body)).unwrap();
        assert_eq!(results.results.len(), 1);
        assert_eq!(results.results[0].snippet, "kept");
        assert_eq!(results.skipped_malformed, 1);
    }

    #[test]
    fn test_multivalued_fields() {
        let solr = SolrEngine::new("http://localhost:8983/solr/core");
        let body = r#"{"response":{"docs":[
            {"content":["Paris is","the capital"],"url":["http://a"]}
        ]}}"#;

        let results = solr.response(reply(body)).unwrap();
        assert_eq!(results.results[0].snippet, "Paris is the capital");
        assert_eq!(results.results[0].source_url, "http://a");
    }

    #[test]
    fn test_error_replies() {
        let solr = SolrEngine::new("http://localhost:8983/solr/core");

        let mut failed = reply("");
        failed.status = 503;
        assert!(solr.response(failed).is_err());

        assert!(solr.response(reply("<html>not json</html>")).is_err());
        assert!(solr.response(reply(r#"{"responseHeader":{}}"#)).is_err());

        let err = solr
            .response(reply(r#"{"error":{"msg":"undefined field content","code":400}}"#))
            .unwrap_err();
        assert!(err.to_string().contains("undefined field content"));
    }

    #[test]
    fn test_custom_fields() {
        let mut solr = SolrEngine::new("http://localhost:8983/solr/core");
        let config = EngineConfig {
            content_field: "text".to_string(),
            url_field: "link".to_string(),
            ..Default::default()
        };
        solr.init(&config).unwrap();
        solr.validate(&config).unwrap();

        let request = solr.request(&RequestParams::new("rust", 5)).unwrap();
        assert_eq!(request.param_value("q"), Some("text:rust"));
        assert_eq!(request.param_value("fl"), Some("text,link"));
    }
}
