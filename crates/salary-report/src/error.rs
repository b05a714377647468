//! Error types for the salary report pipeline.
//!
//! Only conditions that should stop a run are modelled here. Value-level
//! anomalies (unparseable salaries, unknown categories, bad dates) are
//! absorbed by the cleaner and never surface as errors.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the report pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A required column is absent from the input header.
    #[error("Required column '{0}' not found in dataset")]
    MissingColumn(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReportError>,
    },
}

impl ReportError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReportError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable machine-readable code for the error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound(_) => "INPUT_NOT_FOUND",
            Self::MissingColumn(_) => "MISSING_COLUMN",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means the input resource could not be found.
    pub fn is_input_missing(&self) -> bool {
        match self {
            Self::InputNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_input_missing(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields so
/// they can be embedded in JSON run reports.
impl Serialize for ReportError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ReportError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ReportError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ReportError::Io(e).with_context(context))
    }
}
