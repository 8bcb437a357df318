// file: src/exporter/mod.rs
// description: report export module exports
// reference: internal module structure

pub mod markdown;
pub mod pdf;
pub mod writer;

pub use markdown::export_markdown;
pub use pdf::export_pdf;
pub use writer::{ReportWriter, WrittenReport};
