// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod search_hit;

pub use document::{ExtractedDocument, UNKNOWN_PUBLISH_DATE};
pub use search_hit::SearchHit;
