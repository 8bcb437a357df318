// file: src/models/document.rs
// description: Normalized article extracted from a web page
// reference: Fed to the summarizer prompt

use crate::utils::text::truncate_chars;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_PUBLISH_DATE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub title: String,

    /// Body text, already truncated to the extractor's bound
    pub text: String,

    /// Byline names; empty when the page exposes none
    pub authors: Vec<String>,

    /// Date string or `UNKNOWN_PUBLISH_DATE`
    pub publish_date: String,

    pub url: String,
}

impl ExtractedDocument {
    pub fn new(title: String, text: String, publish_date: Option<String>, url: String) -> Self {
        Self {
            title,
            text,
            authors: Vec::new(),
            publish_date: publish_date.unwrap_or_else(|| UNKNOWN_PUBLISH_DATE.to_string()),
            url,
        }
    }

    pub fn excerpt(&self, max_chars: usize) -> &str {
        truncate_chars(&self.text, max_chars)
    }

    pub fn has_known_date(&self) -> bool {
        self.publish_date != UNKNOWN_PUBLISH_DATE
    }
}
