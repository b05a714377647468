//! Column names shared by every stage.

use crate::error::{ReportError, Result};
use polars::prelude::*;

pub const EMPLOYEE_ID: &str = "EmployeeID";
/// Header used by older exports for the employee identifier.
pub const EMPLOYEE_ID_ALIAS: &str = "EmpID";
pub const NAME: &str = "Name";
pub const DEPARTMENT: &str = "Department";
pub const JOB_TITLE: &str = "JobTitle";
pub const SALARY: &str = "Salary";
pub const JOINING_DATE: &str = "JoiningDate";

// Derived by the cleaner
pub const YEARS_OF_SERVICE: &str = "YearsOfService";
pub const SALARY_IMPUTED: &str = "SalaryImputed";

// Summary table headers
pub const AVG_SALARY: &str = "AvgSalary";
pub const TOTAL_SALARY: &str = "TotalSalary";
pub const EMPLOYEE_COUNT: &str = "EmployeeCount";
pub const HIGHEST_PAID: &str = "HighestPaid";

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    EMPLOYEE_ID,
    NAME,
    DEPARTMENT,
    JOB_TITLE,
    SALARY,
    JOINING_DATE,
];

/// Check whether the frame has a column with this exact name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Rename the legacy `EmpID` header to `EmployeeID` when only the alias is present.
pub fn apply_header_aliases(df: &mut DataFrame) -> Result<bool> {
    if !has_column(df, EMPLOYEE_ID) && has_column(df, EMPLOYEE_ID_ALIAS) {
        df.rename(EMPLOYEE_ID_ALIAS, EMPLOYEE_ID.into())?;
        return Ok(true);
    }
    Ok(false)
}

/// Fail with [`ReportError::MissingColumn`] for the first absent required column.
pub fn ensure_required_columns(df: &DataFrame) -> Result<()> {
    match REQUIRED_COLUMNS.iter().find(|col| !has_column(df, col)) {
        Some(missing) => Err(ReportError::MissingColumn((*missing).to_string())),
        None => Ok(()),
    }
}
