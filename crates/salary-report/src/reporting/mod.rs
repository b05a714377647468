//! Report output module.
//!
//! This module writes the summary tables and shows them on the console.
//!
//! # Example
//!
//! ```rust,ignore
//! use salary_report::reporting::{ReportExporter, RunReport, select_renderer};
//!
//! let exporter = ReportExporter::new("out");
//! let files = exporter.write_summaries(&result)?;
//!
//! // Optional JSON run report next to the CSVs
//! let report = RunReport::from_result("employee.csv", &result);
//! exporter.write_report(&report, "employee")?;
//!
//! select_renderer(false).render(&result, &mut std::io::stdout())?;
//! ```

mod exporter;
pub mod render;

pub use exporter::{
    CLEANED_FILE, DEPT_SUMMARY_FILE, ExportedFiles, HIGHEST_PAID_FILE, JOB_SUMMARY_FILE,
    ReportExporter, RunReport,
};
pub use render::{PlainRenderer, SummaryRenderer, TableRenderer, select_renderer};
