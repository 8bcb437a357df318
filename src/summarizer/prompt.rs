// file: src/summarizer/prompt.rs
// description: builds the research prompt from extracted documents
// reference: chat completion prompt layout

use crate::models::ExtractedDocument;

pub const SYSTEM_PROMPT: &str =
    "You are a careful research assistant. Only report facts supported by the provided sources.";

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    excerpt_chars: usize,
}

impl PromptBuilder {
    pub fn new(excerpt_chars: usize) -> Self {
        Self { excerpt_chars }
    }

    /// One `Title/Date/Text` block per document, in input order, separated by
    /// a blank line.
    pub fn build_context(&self, documents: &[ExtractedDocument]) -> String {
        documents
            .iter()
            .map(|doc| {
                format!(
                    "Title: {}\nDate: {}\nText: {}",
                    doc.title,
                    doc.publish_date,
                    doc.excerpt(self.excerpt_chars)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn build_prompt(&self, query: &str, documents: &[ExtractedDocument]) -> String {
        format!(
            "You are a research assistant. Summarize the findings for the query: \"{}\".\n\
             Use bullet points, highlight key facts, and cite each finding with its source title and date.\n\n\
             Sources:\n\n{}",
            query.trim(),
            self.build_context(documents)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(title: &str, date: Option<&str>, text: &str) -> ExtractedDocument {
        ExtractedDocument::new(
            title.to_string(),
            text.to_string(),
            date.map(str::to_string),
            format!("https://example.com/{}", title),
        )
    }

    #[test]
    fn test_context_layout() {
        let builder = PromptBuilder::new(1500);
        let context = builder.build_context(&[
            doc("One", Some("2024-01-01"), "alpha"),
            doc("Two", None, "beta"),
        ]);

        assert_eq!(
            context,
            "Title: One\nDate: 2024-01-01\nText: alpha\n\nTitle: Two\nDate: Unknown\nText: beta"
        );
    }

    #[test]
    fn test_excerpt_bounded() {
        let builder = PromptBuilder::new(1500);
        let long = format!("{}{}", "a".repeat(1500), "b".repeat(500));
        let context = builder.build_context(&[doc("Long", None, &long)]);

        assert!(context.contains(&"a".repeat(1500)));
        assert!(!context.contains('b'));
    }

    #[test]
    fn test_prompt_mentions_query_and_citations() {
        let builder = PromptBuilder::new(100);
        let prompt = builder.build_prompt("  solar subsidies ", &[doc("One", None, "x")]);

        assert!(prompt.starts_with("You are a research assistant."));
        assert!(prompt.contains("\"solar subsidies\""));
        assert!(prompt.contains("bullet points"));
        assert!(prompt.contains("source title and date"));
        assert!(prompt.ends_with("Title: One\nDate: Unknown\nText: x"));
    }
}
