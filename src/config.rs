// file: src/config.rs
// description: application configuration management with toml and environment support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "RESEARCH_ASSISTANT";
pub const SEARCH_KEY_ENV: &str = "SERPAPI_KEY";
pub const MODEL_KEY_ENV: &str = "OPENAI_API_KEY";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Secret credential. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub extraction: ExtractionConfig,
    pub summarizer: SummarizerConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub engine: String,
    pub num_results: usize,
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKey>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    pub timeout_secs: u64,
    pub max_text_chars: usize,
    pub user_agent: String,
    pub concurrency: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummarizerConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub excerpt_chars: usize,
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKey>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Markdown,
    Pdf,
    All,
}

impl ExportFormat {
    pub fn includes_markdown(self) -> bool {
        matches!(self, ExportFormat::Markdown | ExportFormat::All)
    }

    pub fn includes_pdf(self) -> bool {
        matches!(self, ExportFormat::Pdf | ExportFormat::All)
    }
}

impl Config {
    /// Layers built-in defaults, the TOML file, `RESEARCH_ASSISTANT_*`
    /// environment overrides and finally the bare credential variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(file).required(path.is_some()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.apply_credential_env();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            search: SearchConfig {
                endpoint: "https://serpapi.com/search".to_string(),
                engine: "google".to_string(),
                num_results: 5,
                timeout_secs: 30,
                api_key: None,
            },
            extraction: ExtractionConfig {
                timeout_secs: 10,
                max_text_chars: 5000,
                user_agent: BROWSER_USER_AGENT.to_string(),
                concurrency: 1,
            },
            summarizer: SummarizerConfig {
                endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
                model: "gpt-4o-mini".to_string(),
                temperature: 0.3,
                max_tokens: 600,
                excerpt_chars: 1500,
                timeout_secs: 60,
                api_key: None,
            },
            export: ExportConfig {
                output_dir: PathBuf::from("./reports"),
                format: ExportFormat::All,
            },
        }
    }

    /// Both keys must be present before a research run touches the network.
    pub fn require_credentials(&self) -> Result<()> {
        if self.search.api_key.is_none() {
            return Err(PipelineError::Config(format!(
                "search API key missing (set {} or search.api_key)",
                SEARCH_KEY_ENV
            )));
        }

        if self.summarizer.api_key.is_none() {
            return Err(PipelineError::Config(format!(
                "language model API key missing (set {} or summarizer.api_key)",
                MODEL_KEY_ENV
            )));
        }

        Ok(())
    }

    fn apply_credential_env(&mut self) {
        if self.search.api_key.is_none() {
            self.search.api_key = read_key(SEARCH_KEY_ENV);
        }
        if self.summarizer.api_key.is_none() {
            self.summarizer.api_key = read_key(MODEL_KEY_ENV);
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.search.endpoint)
            .map_err(|e| PipelineError::Config(format!("search.endpoint: {}", e)))?;
        Validator::validate_url(&self.summarizer.endpoint)
            .map_err(|e| PipelineError::Config(format!("summarizer.endpoint: {}", e)))?;

        if self.search.num_results == 0 {
            return Err(PipelineError::Config(
                "search.num_results must be greater than 0".to_string(),
            ));
        }

        if self.extraction.max_text_chars == 0 {
            return Err(PipelineError::Config(
                "extraction.max_text_chars must be greater than 0".to_string(),
            ));
        }

        if self.extraction.concurrency == 0 {
            return Err(PipelineError::Config(
                "extraction.concurrency must be greater than 0".to_string(),
            ));
        }

        if self.summarizer.excerpt_chars == 0 {
            return Err(PipelineError::Config(
                "summarizer.excerpt_chars must be greater than 0".to_string(),
            ));
        }

        if self.summarizer.max_tokens == 0 {
            return Err(PipelineError::Config(
                "summarizer.max_tokens must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.summarizer.temperature) {
            return Err(PipelineError::Config(format!(
                "summarizer.temperature must be within 0.0..=2.0, got {}",
                self.summarizer.temperature
            )));
        }

        Ok(())
    }
}

fn read_key(var: &str) -> Option<ApiKey> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(ApiKey::new)
}
