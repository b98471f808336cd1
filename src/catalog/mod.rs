mod generator;

pub use generator::{CatalogGenerator, ATTRIBUTES};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A single product listing, described as attribute name -> value.
///
/// Values are conventionally in `0.0..=1.0`. No attribute is required; reading
/// an attribute that is not present yields `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CatalogRecord {
    attributes: BTreeMap<String, f64>,
}

impl CatalogRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.attributes.insert(name.into(), value);
    }

    /// Value of `name`, or `0.0` when the attribute is absent.
    pub fn get(&self, name: &str) -> f64 {
        self.attributes.get(name).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for CatalogRecord {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Load a catalog record from a flat YAML or JSON mapping.
///
/// Files ending in `.json` are read as JSON, everything else as YAML.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if any value is not a number.
pub fn load_catalog(path: &Path) -> Result<CatalogRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file at {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let record = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: invalid YAML in {}", path.display()))?
    };

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_missing_attribute_reads_zero() {
        let record = CatalogRecord::new().with("labeling", 0.7);
        assert_eq!(record.get("labeling"), 0.7);
        assert_eq!(record.get("price_present"), 0.0);
        assert!(!record.contains("price_present"));
    }

    #[test]
    fn test_from_iterator() {
        let record: CatalogRecord = [("a", 0.1), ("b", 0.2)].into_iter().collect();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("b"), 0.2);
    }

    #[test]
    fn test_parse_yaml_mapping() {
        let yaml = r#"
labeling: 1.0
image_present: 0.25
"#;
        let record: CatalogRecord = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(record.get("labeling"), 1.0);
        assert_eq!(record.get("image_present"), 0.25);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let json = r#"{"labeling": "yes"}"#;
        let result: Result<CatalogRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_catalog_json() {
        let temp_path = env::temp_dir().join("catalog_score_test_load.json");
        std::fs::write(&temp_path, r#"{"labeling": 0.5, "price_present": 1}"#).unwrap();

        let record = load_catalog(&temp_path).unwrap();
        assert_eq!(record.get("labeling"), 0.5);
        assert_eq!(record.get("price_present"), 1.0);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let temp_path = env::temp_dir().join("catalog_score_test_missing.yaml");
        let _ = std::fs::remove_file(&temp_path);

        let err = load_catalog(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog file"));
    }
}
