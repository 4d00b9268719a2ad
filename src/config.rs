//! Session configuration
//!
//! Where the dataset lives, where persisted state is written, and the
//! default log filter. Values are layered: built-in defaults, then an
//! optional JSON file, then environment variables and command-line flags
//! (applied by the binary through the builder setters).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Default dataset file name.
pub const DEFAULT_DATASET: &str = "final_data.json";

/// Default persisted state file name.
pub const DEFAULT_STATE: &str = "uma_state.json";

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Session configuration.
///
/// Every field is optional in the JSON file:
///
/// ```json
/// { "dataset_path": "data/units.json", "log_filter": "uma_planner=debug" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset JSON array
    pub dataset_path: PathBuf,
    /// Key-value state file (owned set and team)
    pub state_path: PathBuf,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    /// Built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            state_path: PathBuf::from(DEFAULT_STATE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// Parse a JSON config document; missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if the text is not a config object.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidInput(format!("invalid config: {e}")))
    }

    /// Read a JSON config file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Set the dataset path.
    #[must_use]
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }

    /// Set the state file path.
    #[must_use]
    pub fn state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }

    /// Set the default log filter.
    #[must_use]
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
