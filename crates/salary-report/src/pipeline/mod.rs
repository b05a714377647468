//! Pipeline module.
//!
//! This module provides the report pipeline and its progress reporting.

mod builder;
pub mod progress;

pub use builder::{ReportPipeline, ReportPipelineBuilder};
pub use progress::{ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate};
