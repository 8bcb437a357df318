// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Network failure or non-success HTTP status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Body could not be understood (malformed JSON, unusable HTML).
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Language model error: {0}")]
    Model(String),

    #[error("No documents could be extracted from {attempted} search result(s)")]
    EmptyResult { attempted: usize },

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Short label for the failure class, used in the CLI error banner.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Config(_) => "configuration",
            PipelineError::Validation(_) => "validation",
            PipelineError::Transport(_) => "transport",
            PipelineError::Parse(_) => "parse",
            PipelineError::Model(_) => "model",
            PipelineError::EmptyResult { .. } => "empty result",
            PipelineError::Export(_) => "export",
            PipelineError::Io(_) => "io",
        }
    }
}
