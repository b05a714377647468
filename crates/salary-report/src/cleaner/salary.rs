//! Salary coercion and median imputation.

use crate::utils::parse_finite_f64;

/// Outcome of coercing one raw salary cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SalaryValue {
    Parsed(f64),
    Missing,
}

impl SalaryValue {
    pub fn parsed(self) -> Option<f64> {
        match self {
            Self::Parsed(v) => Some(v),
            Self::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Coerce a raw text cell. Anything that does not parse to a finite number is missing.
pub fn coerce_salary(raw: Option<&str>) -> SalaryValue {
    raw.and_then(parse_finite_f64)
        .map_or(SalaryValue::Missing, SalaryValue::Parsed)
}

/// Coerce an already-numeric cell (frames built in memory rather than loaded from CSV).
pub fn coerce_numeric_salary(raw: Option<f64>) -> SalaryValue {
    match raw {
        Some(v) if v.is_finite() => SalaryValue::Parsed(v),
        _ => SalaryValue::Missing,
    }
}

/// Median of the values; the mean of the two middle values for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Salaries after imputation, row-aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryImputation {
    pub values: Vec<f64>,
    pub imputed: Vec<bool>,
    /// Value used for missing rows.
    pub fill_value: f64,
    /// True when no salary parsed and the configured fallback was used.
    pub used_fallback: bool,
}

impl SalaryImputation {
    pub fn imputed_count(&self) -> usize {
        self.imputed.iter().filter(|&&flag| flag).count()
    }
}

/// Fill every missing salary with the median of the parsed ones.
///
/// `fallback` stands in for the median when nothing parsed.
pub fn impute_salaries(coerced: &[SalaryValue], fallback: f64) -> SalaryImputation {
    let parsed: Vec<f64> = coerced.iter().filter_map(|v| v.parsed()).collect();
    let (fill_value, used_fallback) = match median(&parsed) {
        Some(m) => (m, false),
        None => (fallback, true),
    };

    let values = coerced
        .iter()
        .map(|v| v.parsed().unwrap_or(fill_value))
        .collect();
    let imputed = coerced.iter().map(|v| v.is_missing()).collect();

    SalaryImputation {
        values,
        imputed,
        fill_value,
        used_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_coerce_salary() {
        assert_eq!(coerce_salary(Some("55000")), SalaryValue::Parsed(55000.0));
        assert_eq!(coerce_salary(Some(" 55000.50 ")), SalaryValue::Parsed(55000.5));
        assert_eq!(coerce_salary(Some("fifty")), SalaryValue::Missing);
        assert_eq!(coerce_salary(Some("")), SalaryValue::Missing);
        assert_eq!(coerce_salary(None), SalaryValue::Missing);
    }

    #[test]
    fn test_coerce_salary_separators_are_missing() {
        // A decimal comma must not turn into a salary 100 times too large
        assert_eq!(coerce_salary(Some("50000,50")), SalaryValue::Missing);
        assert_eq!(coerce_salary(Some("1 000")), SalaryValue::Missing);
        assert_eq!(coerce_salary(Some("$85,000")), SalaryValue::Missing);
    }

    #[test]
    fn test_coerce_numeric_salary_rejects_non_finite() {
        assert_eq!(coerce_numeric_salary(Some(10.0)), SalaryValue::Parsed(10.0));
        assert_eq!(coerce_numeric_salary(Some(f64::NAN)), SalaryValue::Missing);
        assert_eq!(coerce_numeric_salary(Some(f64::INFINITY)), SalaryValue::Missing);
        assert_eq!(coerce_numeric_salary(None), SalaryValue::Missing);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[30.0, 10.0, 20.0]), Some(20.0));
        assert_eq!(median(&[40.0, 10.0, 30.0, 20.0]), Some(25.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_missing_filled_with_median_of_parsed() {
        let coerced = [
            SalaryValue::Parsed(10.0),
            SalaryValue::Parsed(20.0),
            SalaryValue::Parsed(30.0),
            SalaryValue::Missing,
        ];
        let result = impute_salaries(&coerced, 0.0);

        assert_eq!(result.values, vec![10.0, 20.0, 30.0, 20.0]);
        assert_eq!(result.imputed, vec![false, false, false, true]);
        assert_eq!(result.fill_value, 20.0);
        assert!(!result.used_fallback);
        assert_eq!(result.imputed_count(), 1);
    }

    #[test]
    fn test_all_missing_uses_fallback() {
        let coerced = [SalaryValue::Missing, SalaryValue::Missing];
        let result = impute_salaries(&coerced, 0.0);

        assert_eq!(result.values, vec![0.0, 0.0]);
        assert!(result.used_fallback);
        assert_eq!(result.imputed_count(), 2);
    }

    #[test]
    fn test_custom_fallback() {
        let result = impute_salaries(&[SalaryValue::Missing], 42_000.0);
        assert_eq!(result.values, vec![42_000.0]);
    }

    #[test]
    fn test_empty_input() {
        let result = impute_salaries(&[], 0.0);
        assert!(result.values.is_empty());
        assert!(result.used_fallback);
    }
}
