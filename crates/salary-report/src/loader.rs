//! CSV loading for the raw employee table.

use crate::error::{ReportError, Result, ResultExt};
use crate::schema::{apply_header_aliases, ensure_required_columns};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Load an employee CSV with every column read as text.
///
/// Schema inference is disabled so that malformed salaries or dates can
/// never fail the read; the cleaner coerces them afterwards.
pub fn load_employees(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReportError::InputNotFound(path.to_path_buf()));
    }

    info!("Loading employee records from: {}", path.display());
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Opening {}", path.display()))?
        .finish()
        .context(format!("Reading {}", path.display()))?;

    if apply_header_aliases(&mut df)? {
        debug!("Renamed legacy 'EmpID' header to 'EmployeeID'");
    }
    ensure_required_columns(&df)?;

    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}
