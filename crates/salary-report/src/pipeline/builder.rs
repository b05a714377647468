//! The report pipeline and its builder.

use crate::aggregate::Aggregator;
use crate::cleaner::EmployeeCleaner;
use crate::config::{ConfigValidationError, ReportConfig};
use crate::dedup::deduplicate;
use crate::error::{Result, ResultExt};
use crate::pipeline::progress::{
    ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate,
};
use crate::schema::{apply_header_aliases, ensure_required_columns};
use crate::types::{PipelineResult, RunSummary};
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Deduplicates, cleans and aggregates an employee frame.
///
/// # Example
///
/// ```rust,ignore
/// use salary_report::{ReportConfig, ReportPipeline};
///
/// let result = ReportPipeline::builder()
///     .config(ReportConfig::builder().reference_date(date).build()?)
///     .on_progress(|update| println!("[{:.0}%] {}", update.progress * 100.0, update.message))
///     .build()?
///     .process(df)?;
///
/// for row in &result.department_summary {
///     println!("{}: {:.2}", row.department, row.avg_salary);
/// }
/// ```
pub struct ReportPipeline {
    config: ReportConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    cleaner: EmployeeCleaner,
    aggregator: Aggregator,
}

static_assertions::assert_impl_all!(ReportPipeline: Send);

impl ReportPipeline {
    pub fn builder() -> ReportPipelineBuilder {
        ReportPipelineBuilder::default()
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Run deduplication, cleaning and aggregation on a fully loaded frame.
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        match self.process_internal(df) {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Report pipeline completed"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn process_internal(&self, mut df: DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();
        let reference_date = self.config.resolve_reference_date();
        let mut processing_steps: Vec<String> = Vec::new();

        info!("Starting report pipeline (reference date {})...", reference_date);
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Initializing,
            0.0,
            "Validating input columns...",
        ));
        apply_header_aliases(&mut df)?;
        ensure_required_columns(&df)?;

        // Step 1: Deduplicate on employee id
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Deduplicating,
            0.0,
            "Removing duplicate employee ids...",
        ));
        info!("Step 1: Removing duplicate employee ids...");
        let (df, dedup) = deduplicate(&df).context("Deduplicating employees")?;
        if dedup.duplicates_removed > 0 {
            processing_steps.push(format!(
                "Removed {} duplicate employee rows ({} -> {})",
                dedup.duplicates_removed, dedup.rows_before, dedup.rows_after
            ));
        } else {
            processing_steps.push("No duplicate employee ids found".to_string());
        }
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Deduplicating,
            1.0,
            format!("{} duplicates removed", dedup.duplicates_removed),
        ));

        // Step 2: Clean records
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Cleaning,
            0.0,
            "Cleaning employee records...",
        ));
        info!("Step 2: Cleaning employee records...");
        let (cleaned, cleaning) = self
            .cleaner
            .clean(df, reference_date, &mut processing_steps)
            .context("Cleaning employees")?;
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Cleaning,
            1.0,
            format!("{} salaries imputed", cleaning.salaries_imputed),
        ));

        // Step 3: Aggregate
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Aggregating,
            0.0,
            "Computing salary summaries...",
        ));
        info!("Step 3: Computing salary summaries...");
        let aggregates = self
            .aggregator
            .aggregate(&cleaned)
            .context("Aggregating salaries")?;
        processing_steps.push(format!(
            "Summarized {} departments and {} job titles",
            aggregates.departments.len(),
            aggregates.job_titles.len()
        ));
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Aggregating,
            1.0,
            "Summaries ready",
        ));

        let mut summary = RunSummary::new(reference_date, &dedup, &cleaning, &aggregates);
        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Pipeline finished in {}ms: {} rows cleaned, {} salaries imputed",
            summary.duration_ms, summary.rows_cleaned, summary.salaries_imputed
        );

        Ok(PipelineResult {
            cleaned,
            department_summary: aggregates.departments,
            job_title_summary: aggregates.job_titles,
            highest_paid: aggregates.highest_paid,
            summary,
            processing_steps,
        })
    }
}

/// Builder for [`ReportPipeline`].
#[derive(Default)]
pub struct ReportPipelineBuilder {
    config: Option<ReportConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl ReportPipelineBuilder {
    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<ReportPipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(ReportPipeline {
            cleaner: EmployeeCleaner::new(&config),
            aggregator: Aggregator::new(config.group_order),
            progress_reporter: self.progress_reporter,
            config,
        })
    }
}
