// file: src/utils/mod.rs
// description: utility functions module exports
// reference: internal module structure

pub mod logging;
pub mod text;
pub mod validation;

pub use text::{collapse_whitespace, slugify, truncate_chars};
pub use validation::Validator;
