//! Progress reporting for the report pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use salary_report::ReportPipeline;
//!
//! let result = ReportPipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:?}] {}", update.stage, update.message);
//!     })
//!     .build()?
//!     .process(df)?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the report pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Validating the input frame
    Initializing,
    /// Removing repeated employee ids
    Deduplicating,
    /// Salary imputation, category normalization, tenure
    Cleaning,
    /// Department and job-title summaries
    Aggregating,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl PipelineStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::Deduplicating => "Removing Duplicates",
            Self::Cleaning => "Cleaning Records",
            Self::Aggregating => "Aggregating Salaries",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Share of the overall run spent in this stage.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Initializing => 0.05,
            Self::Deduplicating => 0.15,
            Self::Cleaning => 0.50,
            Self::Aggregating => 0.30,
            Self::Complete | Self::Failed => 0.0,
        }
    }

    /// Cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Initializing => 0.0,
            Self::Deduplicating => 0.05,
            Self::Cleaning => 0.20,
            Self::Aggregating => 0.70,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// One progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub stage: PipelineStage,
    /// Overall progress (0.0 - 1.0)
    pub progress: f32,
    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(stage: PipelineStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: PipelineStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: PipelineStage::Failed,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
        }
    }
}

/// Receives progress updates from the pipeline.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
