//! A quick look at the raw dataset before cleaning.

use crate::cleaner::coerce_salary;
use crate::error::Result;
use crate::schema::{SALARY, has_column};
use crate::utils::string_values;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Null and distinct counts for one input column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOverview {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
    pub unique_count: usize,
}

/// Statistics over the salaries that parse as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryOverview {
    pub parsed: usize,
    pub unparseable: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

/// Shape and per-column statistics of a raw employee frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: usize,
    pub column_overviews: Vec<ColumnOverview>,
    pub salary: Option<SalaryOverview>,
}

impl DatasetOverview {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let mut column_overviews = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            let series = column.as_materialized_series();
            column_overviews.push(ColumnOverview {
                name: series.name().to_string(),
                dtype: series.dtype().to_string(),
                null_count: series.null_count(),
                unique_count: series.n_unique()?,
            });
        }

        let salary = if has_column(df, SALARY) {
            Some(Self::salary_overview(df)?)
        } else {
            None
        };

        Ok(Self {
            rows: df.height(),
            columns: df.width(),
            column_overviews,
            salary,
        })
    }

    fn salary_overview(df: &DataFrame) -> Result<SalaryOverview> {
        let raw = string_values(df, SALARY)?;
        let parsed: Vec<f64> = raw
            .iter()
            .filter_map(|v| coerce_salary(v.as_deref()).parsed())
            .collect();

        let mean = if parsed.is_empty() {
            None
        } else {
            Some(parsed.iter().sum::<f64>() / parsed.len() as f64)
        };

        Ok(SalaryOverview {
            parsed: parsed.len(),
            unparseable: raw.len() - parsed.len(),
            min: parsed.iter().copied().reduce(f64::min),
            max: parsed.iter().copied().reduce(f64::max),
            mean,
        })
    }
}

impl fmt::Display for DatasetOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {}  Columns: {}", self.rows, self.columns)?;
        writeln!(
            f,
            "{:<20} {:<10} {:>10} {:>10}",
            "Column", "Type", "Nulls", "Unique"
        )?;
        writeln!(f, "{}", "-".repeat(53))?;
        for col in &self.column_overviews {
            writeln!(
                f,
                "{:<20} {:<10} {:>10} {:>10}",
                col.name, col.dtype, col.null_count, col.unique_count
            )?;
        }
        if let Some(salary) = &self.salary {
            writeln!(f)?;
            write!(
                f,
                "Salary: {} parsed, {} missing or malformed",
                salary.parsed, salary.unparseable
            )?;
            if let (Some(min), Some(max), Some(mean)) = (salary.min, salary.max, salary.mean) {
                write!(f, " (min {:.2}, max {:.2}, mean {:.2})", min, max, mean)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
