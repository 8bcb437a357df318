// file: src/utils/validation.rs
// description: input validation for queries, urls and result counts
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use url::Url;

pub const MAX_QUERY_CHARS: usize = 500;
pub const MAX_RESULTS: usize = 100;

pub struct Validator;

impl Validator {
    pub fn validate_query(query: &str) -> Result<()> {
        let trimmed = query.trim();

        if trimmed.is_empty() {
            return Err(PipelineError::Validation("Query is empty".to_string()));
        }

        if trimmed.chars().count() > MAX_QUERY_CHARS {
            return Err(PipelineError::Validation(format!(
                "Query too long (max {} characters)",
                MAX_QUERY_CHARS
            )));
        }

        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        let parsed = Url::parse(url)
            .map_err(|e| PipelineError::Validation(format!("Invalid URL {}: {}", url, e)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(PipelineError::Validation(format!(
                "Unsupported URL scheme '{}': {}",
                other, url
            ))),
        }
    }

    pub fn validate_num_results(num: usize) -> Result<()> {
        if num == 0 {
            return Err(PipelineError::Validation(
                "Number of results must be greater than 0".to_string(),
            ));
        }

        if num > MAX_RESULTS {
            return Err(PipelineError::Validation(format!(
                "Number of results too large (max {})",
                MAX_RESULTS
            )));
        }

        Ok(())
    }

    pub fn validate_content_not_empty(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(PipelineError::Validation("Content is empty".to_string()));
        }
        Ok(())
    }
}
