// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod summarizer;
pub mod utils;

pub use config::{
    ApiKey, Config, ExportConfig, ExportFormat, ExtractionConfig, SearchConfig, SummarizerConfig,
};
pub use error::{PipelineError, Result};
pub use exporter::{ReportWriter, WrittenReport, export_markdown, export_pdf};
pub use extractor::{ArticleExtractor, HtmlArticleExtractor};
pub use models::{ExtractedDocument, SearchHit};
pub use pipeline::{PipelineStage, PipelineStats, ProgressTracker, ResearchPipeline, ResearchReport};
pub use search::{SearchClient, SerpApiClient};
pub use summarizer::{
    ChatMessage, CompletionRequest, LanguageModel, OpenAiChatClient, PromptBuilder, Role,
    Summarizer,
};
pub use utils::Validator;
