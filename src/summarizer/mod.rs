// file: src/summarizer/mod.rs
// description: language model abstraction and the research summarizer
// reference: internal module structure

mod openai;
mod prompt;

pub use openai::OpenAiChatClient;
pub use prompt::{PromptBuilder, SYSTEM_PROMPT};

use crate::config::SummarizerConfig;
use crate::error::{PipelineError, Result};
use crate::models::ExtractedDocument;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    fn model_name(&self) -> &str;
}

pub struct Summarizer {
    model: Arc<dyn LanguageModel>,
    prompt: PromptBuilder,
    temperature: f32,
    max_tokens: u32,
}

impl Summarizer {
    pub fn new(model: Arc<dyn LanguageModel>, config: &SummarizerConfig) -> Self {
        Self {
            model,
            prompt: PromptBuilder::new(config.excerpt_chars),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn from_config(config: &SummarizerConfig) -> Result<Self> {
        let client = OpenAiChatClient::new(config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn build_request(&self, documents: &[ExtractedDocument], query: &str) -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(self.prompt.build_prompt(query, documents)),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Single completion call; the output is returned verbatim, with no
    /// check that its citations match the sources.
    pub async fn summarize(&self, documents: &[ExtractedDocument], query: &str) -> Result<String> {
        if documents.is_empty() {
            return Err(PipelineError::EmptyResult { attempted: 0 });
        }

        let request = self.build_request(documents, query);

        info!(
            model = %self.model.model_name(),
            documents = documents.len(),
            "Summarizing sources"
        );

        match self.model.complete(&request).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                warn!("Summarization failed: {}", e);
                Err(match e {
                    PipelineError::Model(_) => e,
                    other => PipelineError::Model(other.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::sync::Mutex;

    struct RecordingModel {
        requests: Mutex<Vec<CompletionRequest>>,
        reply: Result<String>,
    }

    impl RecordingModel {
        fn replying(reply: Result<String>) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                reply,
            })
        }
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        async fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(PipelineError::Transport(e.to_string())),
            }
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    fn docs() -> Vec<ExtractedDocument> {
        vec![ExtractedDocument::new(
            "Grid Storage".to_string(),
            "Batteries".to_string(),
            Some("2024-02-02".to_string()),
            "https://example.com/grid".to_string(),
        )]
    }

    #[tokio::test]
    async fn test_summarize_uses_configured_sampling() {
        let model = RecordingModel::replying(Ok("- finding".to_string()));
        let summarizer = Summarizer::new(model.clone(), &Config::default_config().summarizer);

        let summary = summarizer.summarize(&docs(), "energy storage").await.unwrap();
        assert_eq!(summary, "- finding");

        let requests = model.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].temperature, 0.3);
        assert_eq!(requests[0].max_tokens, 600);
        assert_eq!(requests[0].messages[0].role, Role::System);
        assert!(requests[0].messages[1].content.contains("Title: Grid Storage"));
    }

    #[tokio::test]
    async fn test_empty_documents_never_call_model() {
        let model = RecordingModel::replying(Ok("unused".to_string()));
        let summarizer = Summarizer::new(model.clone(), &Config::default_config().summarizer);

        let result = summarizer.summarize(&[], "anything").await;
        assert!(matches!(result, Err(PipelineError::EmptyResult { .. })));
        assert!(model.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failures_surface_as_model_errors() {
        let model = RecordingModel::replying(Err(PipelineError::Transport("reset".to_string())));
        let summarizer = Summarizer::new(model, &Config::default_config().summarizer);

        let result = summarizer.summarize(&docs(), "anything").await;
        assert!(matches!(result, Err(PipelineError::Model(_))));
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
