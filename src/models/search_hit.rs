// file: src/models/search_hit.rs
// description: Search hit returned by the web search client
// reference: SerpAPI organic_results entries

use serde::{Deserialize, Serialize};

/// One organic result, in engine relevance order. Either field may be
/// missing upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: Option<String>,
    pub link: Option<String>,
}

impl SearchHit {
    pub fn new(title: Option<String>, link: Option<String>) -> Self {
        Self { title, link }
    }

    /// Title for display, `(untitled)` when absent.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_placeholder() {
        let hit = SearchHit::new(None, Some("https://example.com".to_string()));
        assert_eq!(hit.display_title(), "(untitled)");

        let hit = SearchHit::new(Some("Example".to_string()), None);
        assert_eq!(hit.display_title(), "Example");
    }
}
