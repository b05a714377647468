//! Configuration types for the salary report pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use crate::cleaner::CategoryMappings;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder written into missing job titles.
pub const DEFAULT_UNKNOWN_JOB_TITLE: &str = "Unknown";

/// Ordering of group keys in the summary tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GroupOrder {
    /// Keys in ascending lexical order
    #[default]
    Sorted,
    /// Keys in the order they first appear in the cleaned table
    FirstSeen,
}

/// Configuration for the report pipeline.
///
/// Use [`ReportConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use salary_report::config::{ReportConfig, GroupOrder};
///
/// let config = ReportConfig::builder()
///     .reference_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .group_order(GroupOrder::FirstSeen)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Date that years of service are measured against.
    /// If None, today's local date is used when the pipeline runs.
    /// Default: None
    pub reference_date: Option<NaiveDate>,

    /// Value imputed into every salary when no salary in the dataset parses.
    /// Default: 0.0
    pub salary_fallback: f64,

    /// Placeholder for missing job titles.
    /// Default: "Unknown"
    pub unknown_job_title: String,

    /// Ordering of rows in the department and job-title summaries.
    /// Default: Sorted
    pub group_order: GroupOrder,

    /// Department and job-title normalization tables.
    /// Default: the built-in tables
    pub mappings: CategoryMappings,

    /// Output directory for the summary files.
    /// Default: "."
    pub output_dir: PathBuf,

    /// Whether to also write the full cleaned table.
    /// Default: false
    pub emit_cleaned: bool,

    /// Whether to also write a JSON run report.
    /// Default: false
    pub emit_report: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reference_date: None,
            salary_fallback: 0.0,
            unknown_job_title: DEFAULT_UNKNOWN_JOB_TITLE.to_string(),
            group_order: GroupOrder::default(),
            mappings: CategoryMappings::default(),
            output_dir: PathBuf::from("."),
            emit_cleaned: false,
            emit_report: false,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// The configured reference date, or today's local date.
    pub fn resolve_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.salary_fallback.is_finite() {
            return Err(ConfigValidationError::NonFiniteFallback(
                self.salary_fallback,
            ));
        }

        if self.unknown_job_title.trim().is_empty() {
            return Err(ConfigValidationError::EmptyPlaceholder);
        }

        for (table, map) in [
            ("departments", &self.mappings.departments),
            ("job_titles", &self.mappings.job_titles),
        ] {
            if let Some(key) = map.non_idempotent_keys().into_iter().next() {
                return Err(ConfigValidationError::ChainedMapping {
                    table: table.to_string(),
                    key,
                });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid salary fallback: {0} (must be a finite number)")]
    NonFiniteFallback(f64),

    #[error("Job title placeholder must not be empty")]
    EmptyPlaceholder,

    #[error("Mapping '{key}' in '{table}' points at a value that is remapped again")]
    ChainedMapping { table: String, key: String },
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    reference_date: Option<NaiveDate>,
    salary_fallback: Option<f64>,
    unknown_job_title: Option<String>,
    group_order: Option<GroupOrder>,
    mappings: Option<CategoryMappings>,
    output_dir: Option<PathBuf>,
    emit_cleaned: Option<bool>,
    emit_report: Option<bool>,
}

impl ReportConfigBuilder {
    /// Pin the date years of service are measured against.
    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Set the salary used when the dataset has no parseable salary at all.
    pub fn salary_fallback(mut self, fallback: f64) -> Self {
        self.salary_fallback = Some(fallback);
        self
    }

    /// Set the placeholder for missing job titles.
    pub fn unknown_job_title(mut self, title: impl Into<String>) -> Self {
        self.unknown_job_title = Some(title.into());
        self
    }

    /// Set the ordering of summary rows.
    pub fn group_order(mut self, order: GroupOrder) -> Self {
        self.group_order = Some(order);
        self
    }

    /// Replace the normalization tables.
    pub fn mappings(mut self, mappings: CategoryMappings) -> Self {
        self.mappings = Some(mappings);
        self
    }

    /// Set the output directory for summary files.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Enable or disable writing the cleaned table.
    pub fn emit_cleaned(mut self, emit: bool) -> Self {
        self.emit_cleaned = Some(emit);
        self
    }

    /// Enable or disable writing the JSON run report.
    pub fn emit_report(mut self, emit: bool) -> Self {
        self.emit_report = Some(emit);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let config = ReportConfig {
            reference_date: self.reference_date,
            salary_fallback: self.salary_fallback.unwrap_or(0.0),
            unknown_job_title: self
                .unknown_job_title
                .unwrap_or_else(|| DEFAULT_UNKNOWN_JOB_TITLE.to_string()),
            group_order: self.group_order.unwrap_or_default(),
            mappings: self.mappings.unwrap_or_default(),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            emit_cleaned: self.emit_cleaned.unwrap_or(false),
            emit_report: self.emit_report.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}
