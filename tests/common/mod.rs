#![allow(dead_code)]

use async_trait::async_trait;
use research_assistant::{
    CompletionRequest, Config, HtmlArticleExtractor, LanguageModel, PipelineError,
    ResearchPipeline, Result, SearchClient, SearchHit, Summarizer,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CARBON_TAX: &str = include_str!("../fixtures/carbon_tax.html");
pub const ETS_REFORM: &str = include_str!("../fixtures/ets_reform.html");
pub const ADAPTATION: &str = include_str!("../fixtures/adaptation_report.html");

pub const SUMMARY: &str = "- Carbon tax rates rose across Europe (Carbon Tax Rates Rise Across Europe, 2024-02-14)\n\
- The EU reformed emissions trading (EU Agrees Emissions Trading Reform, 2024-04-18)";

/// Returns a fixed hit list, or a transport failure when `hits` is `None`.
pub struct StaticSearch {
    hits: Option<Vec<SearchHit>>,
    pub calls: AtomicUsize,
}

impl StaticSearch {
    pub fn returning(hits: Vec<SearchHit>) -> Arc<Self> {
        Arc::new(Self {
            hits: Some(hits),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            hits: None,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SearchClient for StaticSearch {
    async fn search(&self, _query: &str, num_results: usize) -> Result<Vec<SearchHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.hits {
            Some(hits) => Ok(hits.iter().take(num_results).cloned().collect()),
            None => Err(PipelineError::Transport("connection reset".to_string())),
        }
    }
}

/// Records every request; replies with fixed text, or a model error when
/// `reply` is `None`.
pub struct RecordingModel {
    pub requests: Mutex<Vec<CompletionRequest>>,
    reply: Option<String>,
}

impl RecordingModel {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Some(reply.to_string()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: None,
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> String {
        let requests = self.requests.lock().unwrap();
        let request = requests.last().expect("model was called");
        request.messages.last().expect("user message").content.clone()
    }
}

#[async_trait]
impl LanguageModel for RecordingModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .ok_or_else(|| PipelineError::Model("HTTP 500 from completion endpoint".to_string()))
    }

    fn model_name(&self) -> &str {
        "recording-model"
    }
}

pub async fn serve_fixtures() -> MockServer {
    let server = MockServer::start().await;

    for (route, body) in [
        ("/carbon-tax", CARBON_TAX),
        ("/ets-reform", ETS_REFORM),
        ("/adaptation", ADAPTATION),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string(body),
            )
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    server
}

pub fn hit(server: &MockServer, title: &str, route: &str) -> SearchHit {
    SearchHit::new(
        Some(title.to_string()),
        Some(format!("{}{}", server.uri(), route)),
    )
}

pub fn pipeline(search: Arc<StaticSearch>, model: Arc<RecordingModel>) -> ResearchPipeline {
    let config = Config::default_config();
    let extractor = HtmlArticleExtractor::new(&config.extraction).unwrap();
    let summarizer = Summarizer::new(model, &config.summarizer);

    ResearchPipeline::new(search, Arc::new(extractor), summarizer).with_num_results(10)
}
