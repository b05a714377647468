//! Grouped salary aggregations over the cleaned employee table.
//!
//! Three tables are produced:
//! - per-department mean, total and headcount
//! - per-job-title mean and maximum
//! - the highest-paid employee of each department
//!
//! Imputed salaries take part exactly like observed ones.

mod grouping;
mod summaries;

pub use grouping::{EmployeeRow, group_rows};
pub use summaries::{
    DepartmentSummary, JobTitleSummary, TopEarner, department_frame, job_title_frame,
    top_earner_frame,
};

use crate::config::GroupOrder;
use crate::error::Result;
use crate::schema::{DEPARTMENT, EMPLOYEE_ID, JOB_TITLE, NAME, SALARY};
use crate::utils::{float_values, string_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// All three summary tables from one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    pub departments: Vec<DepartmentSummary>,
    pub job_titles: Vec<JobTitleSummary>,
    pub highest_paid: Vec<TopEarner>,
    /// Rows left out of the department tables for lack of a department.
    pub rows_without_department: usize,
}

/// Computes summary tables in a fixed group order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    order: GroupOrder,
}

impl Aggregator {
    pub fn new(order: GroupOrder) -> Self {
        Self { order }
    }

    /// Aggregate a cleaned frame.
    pub fn aggregate(&self, df: &DataFrame) -> Result<Aggregates> {
        let rows = collect_rows(df)?;

        let rows_without_department = rows.iter().filter(|r| r.department.is_none()).count();
        if rows_without_department > 0 {
            warn!(
                "{} rows have no department and are excluded from department summaries",
                rows_without_department
            );
        }

        let aggregates = Aggregates {
            departments: self.department_summary(&rows),
            job_titles: self.job_title_summary(&rows),
            highest_paid: self.highest_paid(&rows),
            rows_without_department,
        };
        debug!(
            "Aggregated {} departments and {} job titles",
            aggregates.departments.len(),
            aggregates.job_titles.len()
        );
        Ok(aggregates)
    }

    /// Mean, sum and count of salary per department.
    pub fn department_summary(&self, rows: &[EmployeeRow]) -> Vec<DepartmentSummary> {
        group_rows(rows, |r| r.department.as_deref(), self.order)
            .into_iter()
            .map(|(department, members)| {
                let total_salary: f64 = members.iter().map(|r| r.salary).sum();
                let employee_count = members.len();
                DepartmentSummary {
                    department,
                    avg_salary: total_salary / employee_count as f64,
                    total_salary,
                    employee_count,
                }
            })
            .collect()
    }

    /// Mean and maximum salary per job title.
    pub fn job_title_summary(&self, rows: &[EmployeeRow]) -> Vec<JobTitleSummary> {
        group_rows(rows, |r| r.job_title.as_deref(), self.order)
            .into_iter()
            .map(|(job_title, members)| {
                let total: f64 = members.iter().map(|r| r.salary).sum();
                let highest_paid = members
                    .iter()
                    .map(|r| r.salary)
                    .fold(f64::NEG_INFINITY, f64::max);
                JobTitleSummary {
                    job_title,
                    avg_salary: total / members.len() as f64,
                    highest_paid,
                }
            })
            .collect()
    }

    /// The top earner of each department; the earliest row wins a tie.
    pub fn highest_paid(&self, rows: &[EmployeeRow]) -> Vec<TopEarner> {
        group_rows(rows, |r| r.department.as_deref(), self.order)
            .into_iter()
            .filter_map(|(department, members)| {
                let mut best: Option<&EmployeeRow> = None;
                for row in members {
                    if best.is_none_or(|b| row.salary > b.salary) {
                        best = Some(row);
                    }
                }
                best.map(|row| TopEarner {
                    department,
                    employee_id: row.employee_id.clone(),
                    name: row.name.clone(),
                    salary: row.salary,
                })
            })
            .collect()
    }
}

/// Read the columns the aggregator needs into row structs, in table order.
///
/// Rows whose salary is still null are skipped; a cleaned frame has none.
pub fn collect_rows(df: &DataFrame) -> Result<Vec<EmployeeRow>> {
    let ids = string_values(df, EMPLOYEE_ID)?;
    let names = string_values(df, NAME)?;
    let departments = string_values(df, DEPARTMENT)?;
    let job_titles = string_values(df, JOB_TITLE)?;
    let salaries = float_values(df, SALARY)?;

    let mut skipped = 0usize;
    let rows: Vec<EmployeeRow> = ids
        .into_iter()
        .zip(names)
        .zip(departments)
        .zip(job_titles)
        .zip(salaries)
        .filter_map(|((((employee_id, name), department), job_title), salary)| {
            let Some(salary) = salary.filter(|s| s.is_finite()) else {
                skipped += 1;
                return None;
            };
            Some(EmployeeRow {
                employee_id,
                name,
                department,
                job_title,
                salary,
            })
        })
        .collect();

    if skipped > 0 {
        warn!("Skipped {} rows without a usable salary during aggregation", skipped);
    }
    Ok(rows)
}
