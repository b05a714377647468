//! Summary row types and their frame conversions.

use crate::schema::{
    AVG_SALARY, DEPARTMENT, EMPLOYEE_COUNT, EMPLOYEE_ID, HIGHEST_PAID, JOB_TITLE, NAME, SALARY,
    TOTAL_SALARY,
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Salary statistics for one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub department: String,
    pub avg_salary: f64,
    pub total_salary: f64,
    pub employee_count: usize,
}

/// Salary statistics for one job title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTitleSummary {
    pub job_title: String,
    pub avg_salary: f64,
    pub highest_paid: f64,
}

/// The highest-paid employee of a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEarner {
    pub department: String,
    pub employee_id: Option<String>,
    pub name: Option<String>,
    pub salary: f64,
}

/// `Department, AvgSalary, TotalSalary, EmployeeCount`
pub fn department_frame(rows: &[DepartmentSummary]) -> PolarsResult<DataFrame> {
    df!(
        DEPARTMENT => rows.iter().map(|r| r.department.clone()).collect::<Vec<_>>(),
        AVG_SALARY => rows.iter().map(|r| r.avg_salary).collect::<Vec<_>>(),
        TOTAL_SALARY => rows.iter().map(|r| r.total_salary).collect::<Vec<_>>(),
        EMPLOYEE_COUNT => rows.iter().map(|r| r.employee_count as u64).collect::<Vec<_>>(),
    )
}

/// `JobTitle, AvgSalary, HighestPaid`
pub fn job_title_frame(rows: &[JobTitleSummary]) -> PolarsResult<DataFrame> {
    df!(
        JOB_TITLE => rows.iter().map(|r| r.job_title.clone()).collect::<Vec<_>>(),
        AVG_SALARY => rows.iter().map(|r| r.avg_salary).collect::<Vec<_>>(),
        HIGHEST_PAID => rows.iter().map(|r| r.highest_paid).collect::<Vec<_>>(),
    )
}

/// `Department, EmployeeID, Name, Salary`
pub fn top_earner_frame(rows: &[TopEarner]) -> PolarsResult<DataFrame> {
    df!(
        DEPARTMENT => rows.iter().map(|r| r.department.clone()).collect::<Vec<_>>(),
        EMPLOYEE_ID => rows.iter().map(|r| r.employee_id.clone()).collect::<Vec<_>>(),
        NAME => rows.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
        SALARY => rows.iter().map(|r| r.salary).collect::<Vec<_>>(),
    )
}
