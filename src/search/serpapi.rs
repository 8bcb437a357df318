// file: src/search/serpapi.rs
// description: SerpAPI integration returning organic search results
// reference: https://serpapi.com/search-api

use super::SearchClient;
use crate::config::{ApiKey, SearchConfig};
use crate::error::{PipelineError, Result};
use crate::models::SearchHit;
use crate::utils::validation::Validator;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,

    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    link: Option<String>,
}

pub struct SerpApiClient {
    client: Client,
    endpoint: String,
    engine: String,
    api_key: ApiKey,
}

impl SerpApiClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| PipelineError::Config("search API key is not configured".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to build search client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            engine: config.engine.clone(),
            api_key,
        })
    }

    fn parse_hits(body: &str, num_results: usize) -> Result<Vec<SearchHit>> {
        let response: SerpApiResponse = serde_json::from_str(body).map_err(|e| {
            PipelineError::Parse(format!("Search API returned invalid JSON: {}", e))
        })?;

        if response.organic_results.is_empty()
            && let Some(message) = response.error
        {
            warn!("Search API reported: {}", message);
        }

        Ok(response
            .organic_results
            .into_iter()
            .take(num_results)
            .map(|r| SearchHit::new(r.title, r.link))
            .collect())
    }
}

#[async_trait]
impl SearchClient for SerpApiClient {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>> {
        Validator::validate_query(query)?;
        Validator::validate_num_results(num_results)?;

        debug!(engine = %self.engine, num_results, "Querying search API for \"{}\"", query);

        let num = num_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("engine", self.engine.as_str()),
                ("q", query),
                ("num", num.as_str()),
                ("api_key", self.api_key.expose()),
            ])
            .send()
            .await
            // the request URL carries the api key
            .map_err(|e| {
                PipelineError::Transport(format!("Search request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PipelineError::Transport(format!(
                "Failed to read search response: {}",
                e.without_url()
            ))
        })?;

        if !status.is_success() {
            return Err(PipelineError::Transport(format!(
                "Search API request failed with status {}: {}",
                status,
                body.trim()
            )));
        }

        let hits = Self::parse_hits(&body, num_results)?;
        debug!("Search API returned {} hit(s)", hits.len());
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SerpApiClient {
        let mut config = crate::config::Config::default_config().search;
        config.endpoint = format!("{}/search", server.uri());
        config.api_key = Some(ApiKey::new("test-key"));
        SerpApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_missing_fields_become_none() {
        let body = r#"{"organic_results": [
            {"title": "Only title"},
            {"link": "https://example.com/only-link"},
            {}
        ]}"#;

        let hits = SerpApiClient::parse_hits(body, 10).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0], SearchHit::new(Some("Only title".to_string()), None));
        assert_eq!(
            hits[1],
            SearchHit::new(None, Some("https://example.com/only-link".to_string()))
        );
        assert_eq!(hits[2], SearchHit::new(None, None));
    }

    #[test]
    fn test_missing_organic_results_is_empty() {
        let hits = SerpApiClient::parse_hits(r#"{"error": "no results"}"#, 5).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_non_json_is_parse_error() {
        let result = SerpApiClient::parse_hits("<html>oops</html>", 5);
        assert!(matches!(result, Err(PipelineError::Parse(_))));
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = crate::config::Config::default_config().search;
        assert!(matches!(
            SerpApiClient::new(&config),
            Err(PipelineError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_search_sends_expected_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("engine", "google"))
            .and(query_param("q", "climate policy 2024"))
            .and(query_param("num", "2"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic_results": [
                    {"title": "First", "link": "https://a.example/1"},
                    {"title": "Second", "link": "https://b.example/2"},
                    {"title": "Third", "link": "https://c.example/3"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hits = client_for(&server)
            .search("climate policy 2024", 2)
            .await
            .unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title.as_deref(), Some("First"));
        assert_eq!(hits[1].link.as_deref(), Some("https://b.example/2"));
    }

    #[tokio::test]
    async fn test_search_keeps_duplicates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic_results": [
                    {"title": "Same", "link": "https://a.example/1"},
                    {"title": "Same", "link": "https://a.example/1"}
                ]
            })))
            .mount(&server)
            .await;

        let hits = client_for(&server).search("dupes", 5).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], hits[1]);
    }

    #[tokio::test]
    async fn test_server_error_is_transport_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let result = client_for(&server).search("anything", 3).await;
        assert!(matches!(result, Err(PipelineError::Transport(_))));
    }

    #[tokio::test]
    async fn test_blank_query_rejected_before_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client_for(&server).search("   ", 3).await;
        assert!(matches!(result, Err(PipelineError::Validation(_))));
    }
}
