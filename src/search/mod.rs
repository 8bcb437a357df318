// file: src/search/mod.rs
// description: web search client abstraction and SerpAPI implementation
// reference: internal module structure

mod serpapi;

pub use serpapi::SerpApiClient;

use crate::error::Result;
use crate::models::SearchHit;
use async_trait::async_trait;

#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Returns at most `num_results` hits in engine relevance order.
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>>;
}
