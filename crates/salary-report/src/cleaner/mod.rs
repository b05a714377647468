//! Record cleaning for the deduplicated employee table.
//!
//! This module provides functionality for:
//! - Coercing salaries to numbers and imputing missing ones with the median
//! - Filling missing job titles
//! - Normalizing department and job-title spellings through mapping tables
//! - Deriving years of service from the join date
//!
//! Nothing here fails on bad cell values; anomalies degrade to fallbacks.

mod mapping;
mod salary;
mod tenure;

pub use mapping::{CategoryMap, CategoryMappings};
pub use salary::{
    SalaryImputation, SalaryValue, coerce_numeric_salary, coerce_salary, impute_salaries, median,
};
pub use tenure::{parse_joining_date, years_of_service};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::schema::{
    DEPARTMENT, JOB_TITLE, JOINING_DATE, SALARY, SALARY_IMPUTED, YEARS_OF_SERVICE,
};
use crate::utils::{float_values, is_blank, is_numeric_dtype, string_values};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Counters describing what the cleaner changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningOutcome {
    /// Value written into rows whose salary was missing or malformed.
    pub salary_fill_value: f64,
    /// True when no salary parsed and the configured fallback was used.
    pub salary_fallback_used: bool,
    pub salaries_imputed: usize,
    pub job_titles_filled: usize,
    pub departments_remapped: usize,
    pub job_titles_remapped: usize,
    pub unparseable_joining_dates: usize,
}

/// Cleans employee frames according to a [`ReportConfig`].
#[derive(Debug, Clone)]
pub struct EmployeeCleaner {
    mappings: CategoryMappings,
    unknown_job_title: String,
    salary_fallback: f64,
}

impl EmployeeCleaner {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            mappings: config.mappings.clone(),
            unknown_job_title: config.unknown_job_title.clone(),
            salary_fallback: config.salary_fallback,
        }
    }

    /// Run every cleaning step on a deduplicated frame.
    ///
    /// Steps run in this order:
    /// 1. Salary coercion and median imputation (adds `SalaryImputed`)
    /// 2. Missing job titles filled with the placeholder
    /// 3. Department and job-title normalization
    /// 4. Join-date parsing and `YearsOfService` derivation
    pub fn clean(
        &self,
        mut df: DataFrame,
        reference_date: NaiveDate,
        processing_steps: &mut Vec<String>,
    ) -> Result<(DataFrame, CleaningOutcome)> {
        info!("Cleaning {} employee records...", df.height());

        let imputation = self.clean_salaries(&mut df, processing_steps)?;
        let job_titles_filled = self.fill_job_titles(&mut df, processing_steps)?;
        let departments_remapped = Self::normalize_column(
            &mut df,
            DEPARTMENT,
            &self.mappings.departments,
            processing_steps,
        )?;
        let job_titles_remapped = Self::normalize_column(
            &mut df,
            JOB_TITLE,
            &self.mappings.job_titles,
            processing_steps,
        )?;
        let unparseable_joining_dates =
            Self::derive_tenure(&mut df, reference_date, processing_steps)?;

        Ok((
            df,
            CleaningOutcome {
                salary_fill_value: imputation.fill_value,
                salary_fallback_used: imputation.used_fallback,
                salaries_imputed: imputation.imputed_count(),
                job_titles_filled,
                departments_remapped,
                job_titles_remapped,
                unparseable_joining_dates,
            },
        ))
    }

    /// Replace `Salary` with finite Float64 values and add the `SalaryImputed` flag column.
    pub fn clean_salaries(
        &self,
        df: &mut DataFrame,
        processing_steps: &mut Vec<String>,
    ) -> Result<SalaryImputation> {
        let dtype = df.column(SALARY)?.dtype().clone();
        let coerced: Vec<SalaryValue> = if is_numeric_dtype(&dtype) {
            float_values(df, SALARY)?
                .into_iter()
                .map(coerce_numeric_salary)
                .collect()
        } else {
            string_values(df, SALARY)?
                .iter()
                .map(|v| coerce_salary(v.as_deref()))
                .collect()
        };

        let imputation = impute_salaries(&coerced, self.salary_fallback);

        df.replace(SALARY, Series::new(SALARY.into(), imputation.values.clone()))?;
        let flags = Series::new(SALARY_IMPUTED.into(), imputation.imputed.clone());
        df.with_column(flags)?;

        let imputed = imputation.imputed_count();
        if imputation.used_fallback && imputed > 0 {
            warn!(
                "No salary could be parsed; filled {} rows with fallback {:.2}",
                imputed, imputation.fill_value
            );
            processing_steps.push(format!(
                "Filled '{}' with fallback: {:.2} ({} rows, no parseable salaries)",
                SALARY, imputation.fill_value, imputed
            ));
        } else if imputed > 0 {
            debug!("Imputed {} salaries with median {:.2}", imputed, imputation.fill_value);
            processing_steps.push(format!(
                "Filled '{}' with median: {:.2} ({} rows)",
                SALARY, imputation.fill_value, imputed
            ));
        } else {
            processing_steps.push(format!("No missing or malformed values in '{}'", SALARY));
        }

        Ok(imputation)
    }

    /// Fill null or blank job titles with the configured placeholder.
    pub fn fill_job_titles(
        &self,
        df: &mut DataFrame,
        processing_steps: &mut Vec<String>,
    ) -> Result<usize> {
        let mut filled = 0;
        let titles: Vec<Option<String>> = string_values(df, JOB_TITLE)?
            .into_iter()
            .map(|title| {
                if is_blank(title.as_deref()) {
                    filled += 1;
                    Some(self.unknown_job_title.clone())
                } else {
                    title
                }
            })
            .collect();

        df.replace(JOB_TITLE, Series::new(JOB_TITLE.into(), titles))?;

        if filled > 0 {
            processing_steps.push(format!(
                "Filled '{}' with constant value: '{}' ({} rows)",
                JOB_TITLE, self.unknown_job_title, filled
            ));
        }
        Ok(filled)
    }

    /// Rewrite a categorical column through `map`, returning how many cells changed.
    ///
    /// Unmatched values and nulls are left as they are.
    pub fn normalize_column(
        df: &mut DataFrame,
        column: &str,
        map: &CategoryMap,
        processing_steps: &mut Vec<String>,
    ) -> Result<usize> {
        let mut remapped = 0;
        let values: Vec<Option<String>> = string_values(df, column)?
            .into_iter()
            .map(|value| {
                value.map(|v| {
                    let canonical = map.normalize(&v);
                    if canonical == v {
                        v
                    } else {
                        remapped += 1;
                        canonical.to_string()
                    }
                })
            })
            .collect();

        df.replace(column, Series::new(column.into(), values))?;

        if remapped > 0 {
            debug!("Normalized {} values in '{}'", remapped, column);
            processing_steps.push(format!(
                "Normalized {} '{}' values to canonical spellings",
                remapped, column
            ));
        }
        Ok(remapped)
    }

    /// Parse `JoiningDate` to ISO text and add `YearsOfService`, returning the
    /// number of dates that could not be parsed.
    pub fn derive_tenure(
        df: &mut DataFrame,
        reference_date: NaiveDate,
        processing_steps: &mut Vec<String>,
    ) -> Result<usize> {
        let raw = string_values(df, JOINING_DATE)?;
        let parsed: Vec<Option<NaiveDate>> = raw
            .iter()
            .map(|v| v.as_deref().and_then(parse_joining_date))
            .collect();

        let unparseable = parsed.iter().filter(|d| d.is_none()).count();
        let iso_dates: Vec<Option<String>> = parsed
            .iter()
            .map(|d| d.map(|d| d.format("%Y-%m-%d").to_string()))
            .collect();
        let years: Vec<Option<f64>> = parsed
            .iter()
            .map(|d| d.map(|d| years_of_service(d, reference_date)))
            .collect();

        df.replace(JOINING_DATE, Series::new(JOINING_DATE.into(), iso_dates))?;
        df.with_column(Series::new(YEARS_OF_SERVICE.into(), years))?;

        if unparseable > 0 {
            warn!(
                "{} joining dates could not be parsed; '{}' left empty for those rows",
                unparseable, YEARS_OF_SERVICE
            );
        }
        processing_steps.push(format!(
            "Derived '{}' as of {} ({} unparseable dates)",
            YEARS_OF_SERVICE, reference_date, unparseable
        ));
        Ok(unparseable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw_frame() -> DataFrame {
        df![
            "EmployeeID" => ["1", "2", "3", "4"],
            "Name" => ["Asha", "Ben", "Chen", "Dara"],
            "Department" => [Some("IT"), Some("Marketing"), None, Some("HR")],
            "JobTitle" => [Some("Software Engg"), None, Some("Recruiter"), Some("  ")],
            "Salary" => [Some("10"), Some("20"), Some("30"), Some("oops")],
            "JoiningDate" => [Some("2020-01-01"), Some("garbage"), None, Some("01/01/2023")],
        ]
        .unwrap()
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn cleaner() -> EmployeeCleaner {
        EmployeeCleaner::new(&ReportConfig::default())
    }

    #[test]
    fn test_clean_imputes_malformed_salary_with_median() {
        let mut steps = Vec::new();
        let (df, outcome) = cleaner().clean(raw_frame(), reference(), &mut steps).unwrap();

        let salaries = float_values(&df, SALARY).unwrap();
        assert_eq!(
            salaries,
            vec![Some(10.0), Some(20.0), Some(30.0), Some(20.0)]
        );
        assert_eq!(outcome.salary_fill_value, 20.0);
        assert_eq!(outcome.salaries_imputed, 1);
        assert!(!outcome.salary_fallback_used);

        let flags: Vec<Option<bool>> = df
            .column(SALARY_IMPUTED)
            .unwrap()
            .as_materialized_series()
            .bool()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(flags, vec![Some(false), Some(false), Some(false), Some(true)]);
        assert!(steps.iter().any(|s| s.contains("median")));
    }

    #[test]
    fn test_clean_salary_is_always_finite() {
        let df = df![
            "EmployeeID" => ["1", "2"],
            "Name" => ["A", "B"],
            "Department" => ["IT", "IT"],
            "JobTitle" => ["Recruiter", "Recruiter"],
            "Salary" => [Option::<&str>::None, Some("n/a")],
            "JoiningDate" => ["2020-01-01", "2020-01-01"],
        ]
        .unwrap();
        let (df, outcome) = cleaner().clean(df, reference(), &mut Vec::new()).unwrap();

        assert!(outcome.salary_fallback_used);
        for salary in float_values(&df, SALARY).unwrap() {
            assert!(salary.is_some_and(f64::is_finite));
        }
        assert_eq!(df.column(SALARY).unwrap().null_count(), 0);
    }

    #[test]
    fn test_numeric_salary_column_is_accepted() {
        let mut df = df![
            "Salary" => [Some(100i64), None, Some(300)],
        ]
        .unwrap();
        let imputation = cleaner().clean_salaries(&mut df, &mut Vec::new()).unwrap();

        assert_eq!(imputation.values, vec![100.0, 200.0, 300.0]);
        assert_eq!(df.column(SALARY).unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_job_titles_filled_then_normalized() {
        let (df, outcome) = cleaner().clean(raw_frame(), reference(), &mut Vec::new()).unwrap();

        let titles = string_values(&df, JOB_TITLE).unwrap();
        assert_eq!(
            titles,
            vec![
                Some("Software Engineer".to_string()),
                Some("Unknown".to_string()),
                Some("Recruiter".to_string()),
                Some("Unknown".to_string()),
            ]
        );
        assert_eq!(outcome.job_titles_filled, 2);
        assert_eq!(outcome.job_titles_remapped, 1);
    }

    #[test]
    fn test_unmapped_and_missing_departments_pass_through() {
        let (df, outcome) = cleaner().clean(raw_frame(), reference(), &mut Vec::new()).unwrap();

        let departments = string_values(&df, DEPARTMENT).unwrap();
        assert_eq!(
            departments,
            vec![
                Some("IT".to_string()),
                Some("Marketing".to_string()),
                None,
                Some("HR".to_string()),
            ]
        );
        assert_eq!(outcome.departments_remapped, 0);
    }

    #[test]
    fn test_normalize_column_matches_category_map() {
        let map = CategoryMap::from_pairs([("Human Resources", "HR"), ("HR", "HR")]);
        let raw = ["Human Resources", "HR", "Legal"];
        let mut df = df!["Department" => [Some(raw[0]), Some(raw[1]), Some(raw[2]), None]].unwrap();

        let changed =
            EmployeeCleaner::normalize_column(&mut df, DEPARTMENT, &map, &mut Vec::new()).unwrap();

        let expected: Vec<Option<String>> = raw
            .iter()
            .map(|v| Some(map.normalize(v).to_string()))
            .chain([None])
            .collect();
        assert_eq!(string_values(&df, DEPARTMENT).unwrap(), expected);
        assert_eq!(changed, 1);
    }

    #[test]
    fn test_whitespace_only_job_title_is_filled() {
        let mut df = df!["JobTitle" => [Some("  "), Some("Recruiter"), None]].unwrap();
        let filled = cleaner().fill_job_titles(&mut df, &mut Vec::new()).unwrap();

        assert_eq!(filled, 2);
        assert_eq!(
            string_values(&df, JOB_TITLE).unwrap(),
            vec![
                Some("Unknown".to_string()),
                Some("Recruiter".to_string()),
                Some("Unknown".to_string()),
            ]
        );
    }

    #[test]
    fn test_normalization_twice_equals_once() {
        let map = CategoryMappings::default().job_titles;
        let mut once = df!["JobTitle" => ["Software Engg", "Accountant", "Astronaut"]].unwrap();
        EmployeeCleaner::normalize_column(&mut once, JOB_TITLE, &map, &mut Vec::new()).unwrap();
        let mut twice = once.clone();
        let changed =
            EmployeeCleaner::normalize_column(&mut twice, JOB_TITLE, &map, &mut Vec::new())
                .unwrap();

        assert_eq!(changed, 0);
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_tenure_derived_against_reference_date() {
        let (df, outcome) = cleaner().clean(raw_frame(), reference(), &mut Vec::new()).unwrap();

        let years = float_values(&df, YEARS_OF_SERVICE).unwrap();
        assert_eq!(years, vec![Some(4.0), None, None, Some(1.0)]);
        assert_eq!(outcome.unparseable_joining_dates, 2);

        let dates = string_values(&df, JOINING_DATE).unwrap();
        assert_eq!(dates[0].as_deref(), Some("2020-01-01"));
        assert_eq!(dates[3].as_deref(), Some("2023-01-01"));
        assert_eq!(dates[1], None);
    }

    #[test]
    fn test_custom_placeholder_and_fallback() {
        let config = ReportConfig::builder()
            .unknown_job_title("Unassigned")
            .salary_fallback(1.0)
            .build()
            .unwrap();
        let df = df![
            "EmployeeID" => ["1"],
            "Name" => ["A"],
            "Department" => ["IT"],
            "JobTitle" => [Option::<&str>::None],
            "Salary" => ["bad"],
            "JoiningDate" => ["2020-01-01"],
        ]
        .unwrap();
        let (df, _) = EmployeeCleaner::new(&config)
            .clean(df, reference(), &mut Vec::new())
            .unwrap();

        assert_eq!(
            string_values(&df, JOB_TITLE).unwrap(),
            vec![Some("Unassigned".to_string())]
        );
        assert_eq!(float_values(&df, SALARY).unwrap(), vec![Some(1.0)]);
    }
}
