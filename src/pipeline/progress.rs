// file: src/pipeline/progress.rs
// description: pipeline stage tracking, spinner output and run statistics
// reference: uses indicatif for the spinner and tracks extraction counts

use crate::utils::logging::format_step;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

const ACTIVE_STAGES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Searching,
    Extracting,
    Summarizing,
    Ready,
    Failed,
}

impl PipelineStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Ready | PipelineStage::Failed)
    }

    fn step(self) -> Option<usize> {
        match self {
            PipelineStage::Searching => Some(1),
            PipelineStage::Extracting => Some(2),
            PipelineStage::Summarizing => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Searching => "searching",
            PipelineStage::Extracting => "extracting",
            PipelineStage::Summarizing => "summarizing",
            PipelineStage::Ready => "ready",
            PipelineStage::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub hits_found: usize,
    pub documents_extracted: usize,
    pub extraction_failures: usize,
    pub duration: Duration,
}

impl PipelineStats {
    pub fn success_rate(&self) -> f64 {
        let total = self.documents_extracted + self.extraction_failures;
        if total == 0 {
            return 0.0;
        }
        (self.documents_extracted as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    bar: ProgressBar,
    stage: PipelineStage,
    history: Vec<PipelineStage>,
    extracted: usize,
    failed: usize,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(colored: bool) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style(colored));
        bar.enable_steady_tick(Duration::from_millis(120));
        Self::with_bar(bar)
    }

    /// Tracks stages without drawing anything.
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            stage: PipelineStage::Idle,
            history: vec![PipelineStage::Idle],
            extracted: 0,
            failed: 0,
            start_time: Instant::now(),
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Every stage entered so far, starting with `Idle`.
    pub fn history(&self) -> &[PipelineStage] {
        &self.history
    }

    pub fn set_stage(&mut self, stage: PipelineStage) {
        self.stage = stage;
        self.history.push(stage);
        debug!(stage = %stage, "Pipeline stage");
        self.refresh();
    }

    pub fn record_extraction(&mut self, succeeded: bool) {
        if succeeded {
            self.extracted += 1;
        } else {
            self.failed += 1;
        }
        self.refresh();
    }

    pub fn finish(&mut self, stage: PipelineStage) {
        self.set_stage(stage);
        self.bar.finish_and_clear();
    }

    pub fn stats(&self, hits_found: usize) -> PipelineStats {
        PipelineStats {
            hits_found,
            documents_extracted: self.extracted,
            extraction_failures: self.failed,
            duration: self.start_time.elapsed(),
        }
    }

    fn refresh(&self) {
        let Some(step) = self.stage.step() else {
            return;
        };

        let message = match self.stage {
            PipelineStage::Extracting => format!(
                "Extracting articles ({} ok, {} failed)",
                self.extracted, self.failed
            ),
            PipelineStage::Searching => "Searching the web".to_string(),
            _ => "Summarizing sources".to_string(),
        };

        self.bar.set_message(format_step(step, ACTIVE_STAGES, &message));
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

fn spinner_style(colored: bool) -> ProgressStyle {
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] {msg}"
    } else {
        "{spinner} [{elapsed_precise}] {msg}"
    };

    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
}
