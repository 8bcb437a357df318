// file: src/extractor/mod.rs
// description: article extraction abstraction and html scraping implementation
// reference: internal module structure

mod html;

pub use html::{HtmlArticleExtractor, parse_article};

use crate::models::ExtractedDocument;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    /// `None` on any fetch or parse failure; errors never cross this boundary.
    async fn extract_article(&self, url: &str) -> Option<ExtractedDocument>;
}
