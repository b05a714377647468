//! Employee identifier deduplication.

use crate::error::Result;
use crate::schema::EMPLOYEE_ID;
use crate::utils::string_values;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Row counts before and after deduplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupOutcome {
    pub rows_before: usize,
    pub rows_after: usize,
    pub duplicates_removed: usize,
}

/// Keep the first row for each `EmployeeID`, preserving row order.
///
/// Rows without an identifier all fall into one shared bucket, so only the
/// first of them survives.
pub fn deduplicate(df: &DataFrame) -> Result<(DataFrame, DedupOutcome)> {
    let ids = string_values(df, EMPLOYEE_ID)?;
    let mask = first_occurrence_mask(&ids);

    let keep = BooleanChunked::from_slice("keep".into(), &mask);
    let deduped = df.filter(&keep)?;

    let outcome = DedupOutcome {
        rows_before: df.height(),
        rows_after: deduped.height(),
        duplicates_removed: df.height() - deduped.height(),
    };
    debug!(
        "Removed {} duplicate employee ids ({} -> {} rows)",
        outcome.duplicates_removed, outcome.rows_before, outcome.rows_after
    );

    Ok((deduped, outcome))
}

/// `true` at the first index of every distinct key, including the `None` key.
pub fn first_occurrence_mask<K: Eq + std::hash::Hash>(keys: &[K]) -> Vec<bool> {
    let mut seen = HashSet::with_capacity(keys.len());
    keys.iter().map(|key| seen.insert(key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_occurrence_kept_in_order() {
        let df = df![
            "EmployeeID" => ["3", "1", "3", "2", "1"],
            "Name" => ["first-3", "first-1", "second-3", "only-2", "second-1"],
        ]
        .unwrap();
        let (deduped, outcome) = deduplicate(&df).unwrap();

        assert_eq!(
            string_values(&deduped, "Name").unwrap(),
            vec![
                Some("first-3".to_string()),
                Some("first-1".to_string()),
                Some("only-2".to_string()),
            ]
        );
        assert_eq!(outcome.rows_before, 5);
        assert_eq!(outcome.rows_after, 3);
        assert_eq!(outcome.duplicates_removed, 2);
    }

    #[test]
    fn test_missing_ids_share_one_bucket() {
        let df = df![
            "EmployeeID" => [None, Some("1"), None, None],
            "Name" => ["a", "b", "c", "d"],
        ]
        .unwrap();
        let (deduped, _) = deduplicate(&df).unwrap();

        assert_eq!(
            string_values(&deduped, "Name").unwrap(),
            vec![Some("a".to_string()), Some("b".to_string())]
        );
    }

    #[test]
    fn test_numeric_ids_are_deduplicated() {
        let df = df![
            "EmployeeID" => [101i64, 102, 101],
            "Name" => ["a", "b", "c"],
        ]
        .unwrap();
        let (deduped, outcome) = deduplicate(&df).unwrap();
        assert_eq!(deduped.height(), 2);
        assert_eq!(outcome.duplicates_removed, 1);
    }

    #[test]
    fn test_output_ids_unique_and_not_longer_than_input() {
        let df = df![
            "EmployeeID" => ["a", "b", "a", "c", "b", "a", "d"],
        ]
        .unwrap();
        let (deduped, _) = deduplicate(&df).unwrap();
        let ids = string_values(&deduped, "EmployeeID").unwrap();
        let unique: HashSet<_> = ids.iter().collect();

        assert!(deduped.height() <= df.height());
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_empty_frame() {
        let df = df!["EmployeeID" => Vec::<String>::new()].unwrap();
        let (deduped, outcome) = deduplicate(&df).unwrap();
        assert_eq!(deduped.height(), 0);
        assert_eq!(outcome.duplicates_removed, 0);
    }
}
