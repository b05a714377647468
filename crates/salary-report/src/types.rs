//! Result types returned by the report pipeline.

use crate::aggregate::{
    Aggregates, DepartmentSummary, JobTitleSummary, TopEarner, department_frame,
    job_title_frame, top_earner_frame,
};
use crate::cleaner::CleaningOutcome;
use crate::dedup::DedupOutcome;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Counters and parameters describing one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Date years of service were measured against
    pub reference_date: NaiveDate,
    /// Rows handed to the pipeline
    pub rows_loaded: usize,
    /// Rows remaining after deduplication
    pub rows_cleaned: usize,
    pub duplicates_removed: usize,
    pub salaries_imputed: usize,
    /// Median (or fallback) written into imputed salaries
    pub salary_fill_value: f64,
    pub salary_fallback_used: bool,
    pub job_titles_filled: usize,
    pub departments_remapped: usize,
    pub job_titles_remapped: usize,
    pub unparseable_joining_dates: usize,
    pub rows_without_department: usize,
    pub department_count: usize,
    pub job_title_count: usize,
    /// Wall-clock time spent in the pipeline
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn new(
        reference_date: NaiveDate,
        dedup: &DedupOutcome,
        cleaning: &CleaningOutcome,
        aggregates: &Aggregates,
    ) -> Self {
        Self {
            reference_date,
            rows_loaded: dedup.rows_before,
            rows_cleaned: dedup.rows_after,
            duplicates_removed: dedup.duplicates_removed,
            salaries_imputed: cleaning.salaries_imputed,
            salary_fill_value: cleaning.salary_fill_value,
            salary_fallback_used: cleaning.salary_fallback_used,
            job_titles_filled: cleaning.job_titles_filled,
            departments_remapped: cleaning.departments_remapped,
            job_titles_remapped: cleaning.job_titles_remapped,
            unparseable_joining_dates: cleaning.unparseable_joining_dates,
            rows_without_department: aggregates.rows_without_department,
            department_count: aggregates.departments.len(),
            job_title_count: aggregates.job_titles.len(),
            duration_ms: 0,
        }
    }
}

/// Everything produced by [`ReportPipeline::process`](crate::ReportPipeline::process).
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Deduplicated and cleaned employee table
    pub cleaned: DataFrame,
    pub department_summary: Vec<DepartmentSummary>,
    pub job_title_summary: Vec<JobTitleSummary>,
    pub highest_paid: Vec<TopEarner>,
    pub summary: RunSummary,
    /// Human-readable log of what each stage did
    pub processing_steps: Vec<String>,
}

impl PipelineResult {
    pub fn department_frame(&self) -> PolarsResult<DataFrame> {
        department_frame(&self.department_summary)
    }

    pub fn job_title_frame(&self) -> PolarsResult<DataFrame> {
        job_title_frame(&self.job_title_summary)
    }

    pub fn highest_paid_frame(&self) -> PolarsResult<DataFrame> {
        top_earner_frame(&self.highest_paid)
    }
}
