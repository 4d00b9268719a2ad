//! Dataset loader
//!
//! The dataset is a static JSON array of [`UnitRecord`]s read once at
//! startup. There are no incremental updates: the loaded array is the
//! authoritative copy for the whole session.

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::{error, info, warn};

use crate::unit::UnitRecord;
use crate::{Error, Result};

/// In-memory unit dataset with a by-name index.
#[derive(Debug, Default)]
pub struct Dataset {
    units: Vec<UnitRecord>,
    by_name: FxHashMap<String, usize>,
}

impl Dataset {
    /// Build a dataset from already-parsed records.
    ///
    /// Record order is kept. If a name repeats, lookups resolve to the first
    /// occurrence.
    #[must_use]
    pub fn new(units: Vec<UnitRecord>) -> Self {
        let mut by_name = FxHashMap::default();
        for (idx, unit) in units.iter().enumerate() {
            if by_name.contains_key(&unit.name) {
                warn!(name = %unit.name, "duplicate unit name in dataset");
                continue;
            }
            by_name.insert(unit.name.clone(), idx);
        }
        Self { units, by_name }
    }

    /// Empty dataset (used when loading fails).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a dataset from JSON text.
    ///
    /// # Errors
    /// Returns [`Error::DatasetLoad`] if the text is not a JSON array of
    /// unit records.
    pub fn from_json(text: &str) -> Result<Self> {
        let units: Vec<UnitRecord> = serde_json::from_str(text)
            .map_err(|e| Error::DatasetLoad(format!("invalid dataset JSON: {e}")))?;
        Ok(Self::new(units))
    }

    /// Load the dataset file.
    ///
    /// # Errors
    /// Returns [`Error::DatasetLoad`] if the file cannot be read or parsed.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::DatasetLoad(format!("failed to read {}: {e}", path.display()))
        })?;
        let dataset = Self::from_json(&text)?;
        info!(path = %path.display(), units = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    /// Load the dataset file, falling back to an empty dataset on failure.
    ///
    /// The failure is logged; there is no retry.
    pub async fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path).await {
            Ok(dataset) => dataset,
            Err(e) => {
                error!(error = %e, "dataset unavailable, continuing with an empty table");
                Self::empty()
            }
        }
    }

    /// All units in load order.
    #[must_use]
    pub fn units(&self) -> &[UnitRecord] {
        &self.units
    }

    /// Look up a unit by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UnitRecord> {
        self.by_name.get(name).map(|&idx| &self.units[idx])
    }

    /// Number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the dataset has no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_json_keeps_order() {
        let dataset =
            Dataset::from_json(r#"[{"name": "B"}, {"name": "A"}, {"name": "C"}]"#).unwrap();
        let names: Vec<&str> = dataset.units().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert!(dataset.get("A").is_some());
        assert!(dataset.get("Z").is_none());
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        let err = Dataset::from_json(r#"{"name": "A"}"#).unwrap_err();
        assert!(matches!(err, Error::DatasetLoad(_)));
    }

    #[test]
    fn test_duplicate_names_resolve_to_first() {
        let mut first = UnitRecord::new("A");
        first.variant = Some("first".to_string());
        let mut second = UnitRecord::new("A");
        second.variant = Some("second".to_string());

        let dataset = Dataset::new(vec![first, second]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get("A").unwrap().variant.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "A", "innate_distance": ["Mile"]}}]"#).unwrap();

        let dataset = Dataset::load(file.path()).await.unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[tokio::test]
    async fn test_load_or_empty_on_missing_file() {
        let dataset = Dataset::load_or_empty("/nonexistent/final_data.json").await;
        assert!(dataset.is_empty());
    }
}
