// file: src/pipeline/orchestrator.rs
// description: coordinates search, article extraction, summarization and export
// reference: linear request/response research workflow

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::exporter::{export_markdown, export_pdf};
use crate::extractor::{ArticleExtractor, HtmlArticleExtractor};
use crate::models::{ExtractedDocument, SearchHit};
use crate::pipeline::progress::{PipelineStage, PipelineStats, ProgressTracker};
use crate::search::{SearchClient, SerpApiClient};
use crate::summarizer::Summarizer;
use crate::utils::validation::Validator;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{error, info, warn};

const DEFAULT_NUM_RESULTS: usize = 5;

#[derive(Debug, Clone)]
pub struct ResearchReport {
    pub query: String,
    pub hits: Vec<SearchHit>,
    /// Successfully extracted documents, in search result order
    pub documents: Vec<ExtractedDocument>,
    pub summary: String,
    pub stats: PipelineStats,
}

impl ResearchReport {
    pub fn markdown(&self) -> String {
        export_markdown(&self.summary)
    }

    pub fn pdf(&self) -> Result<Vec<u8>> {
        export_pdf(&self.summary, &self.query)
    }
}

pub struct ResearchPipeline {
    search: Arc<dyn SearchClient>,
    extractor: Arc<dyn ArticleExtractor>,
    summarizer: Summarizer,
    num_results: usize,
    concurrency: usize,
}

impl ResearchPipeline {
    pub fn new(
        search: Arc<dyn SearchClient>,
        extractor: Arc<dyn ArticleExtractor>,
        summarizer: Summarizer,
    ) -> Self {
        Self {
            search,
            extractor,
            summarizer,
            num_results: DEFAULT_NUM_RESULTS,
            concurrency: 1,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.require_credentials()?;

        let search = SerpApiClient::new(&config.search)?;
        let extractor = HtmlArticleExtractor::new(&config.extraction)?;
        let summarizer = Summarizer::from_config(&config.summarizer)?;

        Ok(Self::new(Arc::new(search), Arc::new(extractor), summarizer)
            .with_num_results(config.search.num_results)
            .with_concurrency(config.extraction.concurrency))
    }

    pub fn with_num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results;
        self
    }

    /// Extractions in flight at once; 1 keeps them strictly sequential.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn run(&self, query: &str) -> Result<ResearchReport> {
        let mut tracker = ProgressTracker::hidden();
        self.run_with_progress(query, &mut tracker).await
    }

    /// Idle → Searching → Extracting → Summarizing → Ready, or Failed on the
    /// first terminal error. Nothing is exported on failure.
    pub async fn run_with_progress(
        &self,
        query: &str,
        tracker: &mut ProgressTracker,
    ) -> Result<ResearchReport> {
        let result = self.execute(query, tracker).await;

        match &result {
            Ok(report) => {
                tracker.finish(PipelineStage::Ready);
                info!(
                    hits = report.stats.hits_found,
                    documents = report.stats.documents_extracted,
                    "Research complete in {:.2}s",
                    report.stats.duration.as_secs_f64()
                );
            }
            Err(e) => {
                tracker.finish(PipelineStage::Failed);
                error!(kind = e.kind(), "Research failed: {}", e);
            }
        }

        result
    }

    async fn execute(&self, query: &str, tracker: &mut ProgressTracker) -> Result<ResearchReport> {
        Validator::validate_query(query)?;
        let query = query.trim();

        tracker.set_stage(PipelineStage::Searching);
        let hits = self.search.search(query, self.num_results).await?;
        info!("Found {} search result(s) for \"{}\"", hits.len(), query);

        tracker.set_stage(PipelineStage::Extracting);
        let documents: Vec<ExtractedDocument> = self
            .extract_all(&hits, tracker)
            .await
            .into_iter()
            .flatten()
            .collect();

        if documents.is_empty() {
            return Err(PipelineError::EmptyResult {
                attempted: hits.len(),
            });
        }

        tracker.set_stage(PipelineStage::Summarizing);
        let summary = self.summarizer.summarize(&documents, query).await?;

        let stats = tracker.stats(hits.len());

        Ok(ResearchReport {
            query: query.to_string(),
            hits,
            documents,
            summary,
            stats,
        })
    }

    /// One outcome per hit, in hit order. A failed extraction is `None` and
    /// never affects its siblings.
    pub async fn extract_all(
        &self,
        hits: &[SearchHit],
        tracker: &mut ProgressTracker,
    ) -> Vec<Option<ExtractedDocument>> {
        let extractor = &self.extractor;

        stream::iter(hits.iter().map(|hit| async move {
            match hit.link.as_deref() {
                Some(link) => extractor.extract_article(link).await,
                None => {
                    warn!(title = hit.display_title(), "Search hit has no link, skipping");
                    None
                }
            }
        }))
        .buffered(self.concurrency)
        .inspect(|outcome| tracker.record_extraction(outcome.is_some()))
        .collect()
        .await
    }
}
