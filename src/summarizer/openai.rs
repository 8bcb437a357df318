// file: src/summarizer/openai.rs
// description: OpenAI-compatible chat completion client
// reference: https://platform.openai.com/docs/api-reference/chat

use super::{ChatMessage, CompletionRequest, LanguageModel};
use crate::config::{ApiKey, SummarizerConfig};
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiChatClient {
    client: Client,
    endpoint: String,
    api_key: ApiKey,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            PipelineError::Config("language model API key is not configured".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to build model client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LanguageModel for OpenAiChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(
            model = %self.model,
            messages = request.messages.len(),
            "Requesting chat completion"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Model(format!("Failed to send completion request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Model(format!(
                "Completion request failed with status {}: {}",
                status,
                error_text.trim()
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            PipelineError::Model(format!("Failed to parse completion response: {}", e))
        })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| PipelineError::Model("Model returned no completion text".to_string()))?;

        debug!("Received completion of {} chars", text.len());
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
