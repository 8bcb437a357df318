// file: src/exporter/markdown.rs
// description: markdown export of a research summary

/// The summary is already markdown bullet text; it is exported unchanged.
pub fn export_markdown(summary: &str) -> String {
    summary.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_markdown_is_identity() {
        let summary = "- Point one (Source, 2024-01-01)\n- Point two\n";
        assert_eq!(export_markdown(summary), summary);
        assert_eq!(export_markdown(""), "");
    }
}
