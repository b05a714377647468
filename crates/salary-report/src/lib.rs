//! Employee Salary Report Library
//!
//! Batch cleaning and salary aggregation for employee records, built on Polars.
//!
//! # Overview
//!
//! The pipeline turns a raw employee CSV into three summary tables:
//!
//! - **Deduplication**: one row per `EmployeeID`, first occurrence kept
//! - **Cleaning**: salary coercion with median imputation, job-title fill,
//!   department and job-title normalization, years of service
//! - **Aggregation**: per-department and per-job-title salary statistics and
//!   the highest-paid employee of each department
//! - **Reporting**: CSV export, an optional JSON run report and console rendering
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use salary_report::{ReportConfig, ReportExporter, ReportPipeline, load_employees};
//! use chrono::NaiveDate;
//!
//! let df = load_employees("employee.csv")?;
//!
//! let config = ReportConfig::builder()
//!     .reference_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .build()?;
//!
//! let result = ReportPipeline::builder()
//!     .config(config)
//!     .on_progress(|update| println!("[{:.0}%] {}", update.progress * 100.0, update.message))
//!     .build()?
//!     .process(df)?;
//!
//! ReportExporter::new("out").write_summaries(&result)?;
//! ```
//!
//! # Category Mappings
//!
//! Department and job-title spellings are normalized through
//! [`CategoryMappings`]. Values without a mapping entry pass through
//! unchanged. Extra entries can be loaded from JSON:
//!
//! ```rust,ignore
//! let mappings = CategoryMappings::from_overrides_file(Path::new("mappings.json"))?;
//! let config = ReportConfig::builder().mappings(mappings).build()?;
//! ```

pub mod aggregate;
pub mod cleaner;
pub mod config;
pub mod dedup;
pub mod error;
pub mod loader;
pub mod overview;
pub mod pipeline;
pub mod reporting;
pub mod schema;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregate::{Aggregates, Aggregator, DepartmentSummary, JobTitleSummary, TopEarner};
pub use cleaner::{CategoryMap, CategoryMappings, CleaningOutcome, EmployeeCleaner, SalaryValue};
pub use config::{ConfigValidationError, GroupOrder, ReportConfig, ReportConfigBuilder};
pub use dedup::{DedupOutcome, deduplicate};
pub use error::{ReportError, Result as ReportResult, ResultExt};
pub use loader::load_employees;
pub use overview::DatasetOverview;
pub use pipeline::{
    ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate, ReportPipeline,
    ReportPipelineBuilder,
};
pub use reporting::{
    ExportedFiles, PlainRenderer, ReportExporter, RunReport, SummaryRenderer, TableRenderer,
    select_renderer,
};
pub use types::{PipelineResult, RunSummary};
