//! Shared helpers for reading and parsing frame values.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Common missing value markers in exported spreadsheets.
pub const MISSING_MARKERS: [&str; 9] = [
    "error", "unknown", "n/a", "na", "nan", "null", "missing", "none", "#n/a",
];

/// Check if a string is a missing value marker (case-insensitive).
pub fn is_missing_marker(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    MISSING_MARKERS.iter().any(|&marker| lower == marker)
}

/// Check if a value is absent or whitespace-only.
pub fn is_blank(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => v.trim().is_empty(),
    }
}

/// Parse a finite `f64` from a plain decimal string.
///
/// Only surrounding whitespace is ignored. Grouping separators, currency
/// signs and decimal commas make the value unparseable, as do blanks,
/// missing markers and non-finite results such as `inf`.
pub fn parse_finite_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || is_missing_marker(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round half to even at the given number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

// =============================================================================
// Column Extraction Utilities
// =============================================================================

/// Read a column as owned optional strings, casting non-string columns.
pub fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Read a column as optional `f64`, casting numeric columns to Float64.
pub fn float_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}
