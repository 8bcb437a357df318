// file: src/exporter/writer.rs
// description: writes markdown and pdf reports into an output directory

use super::markdown::export_markdown;
use super::pdf::export_pdf;
use crate::config::ExportFormat;
use crate::error::{PipelineError, Result};
use crate::utils::text::slugify;
use crate::utils::validation::Validator;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenReport {
    pub markdown: Option<PathBuf>,
    pub pdf: Option<PathBuf>,
}

impl WrittenReport {
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.markdown.iter().chain(self.pdf.iter())
    }
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<slug>.md` / `<slug>.pdf`, slug derived from the query.
    pub fn file_stem(query: &str) -> String {
        slugify(query)
    }

    pub fn write(&self, summary: &str, query: &str, format: ExportFormat) -> Result<WrittenReport> {
        Validator::validate_content_not_empty(summary)
            .map_err(|_| PipelineError::Export("Refusing to export an empty summary".to_string()))?;

        let stem = Self::file_stem(query);
        let mut written = WrittenReport::default();

        if format.includes_markdown() {
            let path = self.output_dir.join(format!("{}.md", stem));
            fs::write(&path, export_markdown(summary))?;
            info!("Wrote markdown report to {}", path.display());
            written.markdown = Some(path);
        }

        if format.includes_pdf() {
            let path = self.output_dir.join(format!("{}.pdf", stem));
            fs::write(&path, export_pdf(summary, query)?)?;
            info!("Wrote PDF report to {}", path.display());
            written.pdf = Some(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writer_creates_output_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("reports/today");
        let writer = ReportWriter::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(writer.output_dir(), nested.as_path());
    }

    #[test]
    fn test_write_all_formats() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();

        let written = writer
            .write("- one\n- two", "Climate Policy 2024", ExportFormat::All)
            .unwrap();

        let md = written.markdown.clone().unwrap();
        assert_eq!(md, dir.path().join("climate-policy-2024.md"));
        assert_eq!(fs::read_to_string(&md).unwrap(), "- one\n- two");

        let pdf = written.pdf.clone().unwrap();
        assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF-"));
        assert_eq!(written.paths().count(), 2);
    }

    #[test]
    fn test_write_markdown_only() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();

        let written = writer.write("- one", "topic", ExportFormat::Markdown).unwrap();
        assert!(written.markdown.is_some());
        assert!(written.pdf.is_none());
        assert!(!dir.path().join("topic.pdf").exists());
    }

    #[test]
    fn test_empty_summary_is_rejected() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();
        assert!(matches!(
            writer.write("  ", "topic", ExportFormat::All),
            Err(PipelineError::Export(_))
        ));
    }
}
