//! Categorical normalization tables.
//!
//! A [`CategoryMap`] rewrites a value only on an exact, case-sensitive key
//! match. Every other value passes through unchanged.

use crate::error::{ReportError, Result, ResultExt};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

static DEFAULT_DEPARTMENTS: Lazy<CategoryMap> = Lazy::new(|| {
    CategoryMap::from_pairs([
        ("HR", "HR"),
        ("Finance", "Finance"),
        ("IT", "IT"),
        ("Sales", "Sales"),
    ])
});

static DEFAULT_JOB_TITLES: Lazy<CategoryMap> = Lazy::new(|| {
    CategoryMap::from_pairs([
        ("Software Engg", "Software Engineer"),
        ("Software Engineer", "Software Engineer"),
        ("Data Scientist", "Data Scientist"),
        ("Accountant", "Accountant"),
        ("Financial Analyst", "Financial Analyst"),
        ("Senior Accountant", "Senior Accountant"),
        ("System Administrator", "System Administrator"),
        ("Sales Executive", "Sales Executive"),
        ("Sales Manager", "Sales Manager"),
        ("HR Manager", "HR Manager"),
        ("HR Executive", "HR Executive"),
        ("Recruiter", "Recruiter"),
    ])
});

/// Lookup table from raw category spellings to canonical values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap {
    entries: HashMap<String, String>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Canonical value for an exact key match.
    pub fn get(&self, value: &str) -> Option<&str> {
        self.entries.get(value).map(String::as_str)
    }

    /// Mapped value on a hit, the input itself on a miss.
    pub fn normalize<'a>(&'a self, value: &'a str) -> &'a str {
        self.get(value).unwrap_or(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another table into this one; entries from `other` win.
    pub fn extend(&mut self, other: CategoryMap) {
        self.entries.extend(other.entries);
    }

    /// Keys whose target is itself remapped to something else.
    ///
    /// Normalizing twice equals normalizing once only when this is empty.
    pub fn non_idempotent_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, target)| self.get(target).is_some_and(|t| t != target.as_str()))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}

/// The department and job-title tables used by the cleaner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMappings {
    pub departments: CategoryMap,
    pub job_titles: CategoryMap,
}

impl Default for CategoryMappings {
    fn default() -> Self {
        Self {
            departments: DEFAULT_DEPARTMENTS.clone(),
            job_titles: DEFAULT_JOB_TITLES.clone(),
        }
    }
}

/// On-disk shape of a mappings file. Either table may be omitted.
#[derive(Debug, Default, Deserialize)]
struct MappingOverrides {
    #[serde(default)]
    departments: BTreeMap<String, String>,
    #[serde(default)]
    job_titles: BTreeMap<String, String>,
}

impl CategoryMappings {
    /// Empty tables: every value passes through.
    pub fn empty() -> Self {
        Self {
            departments: CategoryMap::new(),
            job_titles: CategoryMap::new(),
        }
    }

    /// Default tables extended with the entries from a JSON document.
    ///
    /// ```json
    /// { "departments": { "Human Resources": "HR" },
    ///   "job_titles": { "Sr Accountant": "Senior Accountant" } }
    /// ```
    pub fn with_overrides_json(json: &str) -> Result<Self> {
        let overrides: MappingOverrides = serde_json::from_str(json)?;
        let mut mappings = Self::default();
        mappings
            .departments
            .extend(CategoryMap::from_pairs(overrides.departments));
        mappings
            .job_titles
            .extend(CategoryMap::from_pairs(overrides.job_titles));
        Ok(mappings)
    }

    /// Load a JSON overrides file on top of the default tables.
    pub fn from_overrides_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::InvalidConfig(format!(
                "mappings file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)
            .context(format!("Reading mappings file {}", path.display()))?;
        Self::with_overrides_json(&content)
            .context(format!("Parsing mappings file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_hit_replaces_value() {
        let mappings = CategoryMappings::default();
        assert_eq!(mappings.job_titles.normalize("Software Engg"), "Software Engineer");
    }

    #[test]
    fn test_normalize_miss_passes_through() {
        let mappings = CategoryMappings::default();
        assert_eq!(mappings.departments.normalize("Marketing"), "Marketing");
        assert_eq!(mappings.job_titles.normalize("Unknown"), "Unknown");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mappings = CategoryMappings::default();
        assert_eq!(mappings.departments.get("hr"), None);
        assert_eq!(mappings.departments.normalize("hr"), "hr");
        assert_eq!(mappings.job_titles.normalize("software engg"), "software engg");
    }

    #[test]
    fn test_default_tables_are_idempotent() {
        let mappings = CategoryMappings::default();
        assert!(mappings.departments.non_idempotent_keys().is_empty());
        assert!(mappings.job_titles.non_idempotent_keys().is_empty());

        for raw in ["Software Engg", "Recruiter", "Chief Vibes Officer", "Unknown"] {
            let once = mappings.job_titles.normalize(raw);
            let twice = mappings.job_titles.normalize(once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_non_idempotent_keys_detected() {
        let map = CategoryMap::from_pairs([("A", "B"), ("B", "C")]);
        assert_eq!(map.non_idempotent_keys(), vec!["A".to_string()]);
    }

    #[test]
    fn test_overrides_extend_defaults() {
        let json = r#"{ "departments": { "Human Resources": "HR" } }"#;
        let mappings = CategoryMappings::with_overrides_json(json).unwrap();

        assert_eq!(mappings.departments.normalize("Human Resources"), "HR");
        assert_eq!(mappings.departments.normalize("IT"), "IT");
        assert_eq!(mappings.job_titles.len(), 12);
    }

    #[test]
    fn test_invalid_overrides_json() {
        let err = CategoryMappings::with_overrides_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "JSON_ERROR");
    }

    #[test]
    fn test_missing_overrides_file() {
        let err = CategoryMappings::from_overrides_file(Path::new("no/such/mappings.json"))
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}
