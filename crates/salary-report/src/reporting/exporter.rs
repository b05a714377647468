use crate::aggregate::{DepartmentSummary, JobTitleSummary, TopEarner};
use crate::error::{Result, ResultExt};
use crate::types::{PipelineResult, RunSummary};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEPT_SUMMARY_FILE: &str = "dept_summary.csv";
pub const JOB_SUMMARY_FILE: &str = "job_summary.csv";
pub const HIGHEST_PAID_FILE: &str = "highest_paid_per_dept.csv";
pub const CLEANED_FILE: &str = "cleaned_employees.csv";

/// Paths of the three summary files written by [`ReportExporter::write_summaries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub dept_summary: PathBuf,
    pub job_summary: PathBuf,
    pub highest_paid: PathBuf,
}

impl ExportedFiles {
    pub fn paths(&self) -> [&Path; 3] {
        [&self.dept_summary, &self.job_summary, &self.highest_paid]
    }
}

/// JSON run report written with `--emit-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    pub summary: RunSummary,
    pub department_summary: Vec<DepartmentSummary>,
    pub job_title_summary: Vec<JobTitleSummary>,
    pub highest_paid: Vec<TopEarner>,
    pub processing_steps: Vec<String>,
}

impl RunReport {
    pub fn from_result(input_file: impl Into<String>, result: &PipelineResult) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.into(),
            summary: result.summary.clone(),
            department_summary: result.department_summary.clone(),
            job_title_summary: result.job_title_summary.clone(),
            highest_paid: result.highest_paid.clone(),
            processing_steps: result.processing_steps.clone(),
        }
    }
}

/// Writes report files into one output directory.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    output_dir: PathBuf,
}

impl ReportExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the department, job-title and highest-paid summaries.
    ///
    /// Each file has a header row and no index column.
    pub fn write_summaries(&self, result: &PipelineResult) -> Result<ExportedFiles> {
        let files = ExportedFiles {
            dept_summary: self.write_csv(&mut result.department_frame()?, DEPT_SUMMARY_FILE)?,
            job_summary: self.write_csv(&mut result.job_title_frame()?, JOB_SUMMARY_FILE)?,
            highest_paid: self.write_csv(&mut result.highest_paid_frame()?, HIGHEST_PAID_FILE)?,
        };
        Ok(files)
    }

    /// Write the full cleaned employee table.
    pub fn write_cleaned(&self, result: &PipelineResult) -> Result<PathBuf> {
        let mut cleaned = result.cleaned.clone();
        self.write_csv(&mut cleaned, CLEANED_FILE)
    }

    /// Write `<base_name>_report.json`.
    pub fn write_report(&self, report: &RunReport, report_base_name: &str) -> Result<PathBuf> {
        self.ensure_output_dir()?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)
            .context(format!("Creating {}", report_path.display()))?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())
            .context(format!("Writing {}", report_path.display()))?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }

    fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir)
            .context(format!("Creating output directory {}", self.output_dir.display()))
    }

    fn write_csv(&self, df: &mut DataFrame, file_name: &str) -> Result<PathBuf> {
        self.ensure_output_dir()?;

        let output_path = self.output_dir.join(file_name);
        let mut file = File::create(&output_path)
            .context(format!("Creating {}", output_path.display()))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)
            .context(format!("Writing {}", output_path.display()))?;

        info!("Saved {} rows to {}", df.height(), output_path.display());
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::pipeline::ReportPipeline;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn result() -> PipelineResult {
        let df = df![
            "EmployeeID" => ["1", "2", "3"],
            "Name" => ["Asha", "Ben", "Chen"],
            "Department" => ["A", "A", "B"],
            "JobTitle" => ["Accountant", "Recruiter", "Accountant"],
            "Salary" => ["100", "200", "300"],
            "JoiningDate" => ["2020-01-01", "2021-01-01", "2022-01-01"],
        ]
        .unwrap();
        let config = ReportConfig::builder()
            .reference_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .build()
            .unwrap();
        ReportPipeline::builder()
            .config(config)
            .build()
            .unwrap()
            .process(df)
            .unwrap()
    }

    fn first_line(path: &Path) -> String {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .next()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_write_summaries_headers() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ReportExporter::new(dir.path().join("nested"));
        let files = exporter.write_summaries(&result()).unwrap();

        assert_eq!(
            first_line(&files.dept_summary),
            "Department,AvgSalary,TotalSalary,EmployeeCount"
        );
        assert_eq!(first_line(&files.job_summary), "JobTitle,AvgSalary,HighestPaid");
        assert_eq!(
            first_line(&files.highest_paid),
            "Department,EmployeeID,Name,Salary"
        );
        for path in files.paths() {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_dept_summary_rows() {
        let dir = tempfile::tempdir().unwrap();
        let files = ReportExporter::new(dir.path())
            .write_summaries(&result())
            .unwrap();

        let content = fs::read_to_string(&files.dept_summary).unwrap();
        let rows: Vec<&str> = content.lines().skip(1).collect();
        assert_eq!(rows, vec!["A,150.0,300.0,2", "B,300.0,300.0,1"]);
    }

    #[test]
    fn test_write_cleaned_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ReportExporter::new(dir.path());
        let result = result();

        let cleaned = exporter.write_cleaned(&result).unwrap();
        assert!(first_line(&cleaned).contains("YearsOfService"));

        let report = RunReport::from_result("employee.csv", &result);
        let path = exporter.write_report(&report, "employee").unwrap();
        assert_eq!(path.file_name().unwrap(), "employee_report.json");

        let parsed: RunReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.summary, result.summary);
        assert_eq!(parsed.department_summary.len(), 2);
    }
}
