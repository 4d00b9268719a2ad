//! Error types for uma-planner
//!
//! Every rejection a user can trigger (full category, duplicate base name,
//! unknown unit, unparseable import) is a variant here with a message that
//! says what to do next.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// uma-planner error types
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset file could not be read or parsed
    #[error("Dataset load failed: {0}")]
    DatasetLoad(String),

    /// Key-value backend failure
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Import document could not be applied
    #[error("Import failed: {0}\nNo state was changed")]
    ImportError(String),

    /// Unit name not present in the loaded dataset
    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    /// Team category already holds the maximum number of units
    #[error("{category} team is full (max {max} units)\nRemove a unit before adding another")]
    CategoryFull {
        /// Category that rejected the unit
        category: String,
        /// Slot limit per category
        max: usize,
    },

    /// Another team member already uses the same base character
    #[error("{base_name} is already in your team as {existing}\nThe same character cannot be used twice")]
    DuplicateBaseName {
        /// Base name shared by both units
        base_name: String,
        /// Team member that already holds the base name
        existing: String,
    },

    /// Team slot index beyond the filled slots of a category
    #[error("{category} has no slot {index} (filled slots: {len})")]
    SlotOutOfRange {
        /// Category addressed
        category: String,
        /// Requested slot index
        index: usize,
        /// Number of filled slots
        len: usize,
    },

    /// Invalid user input (filter values, sort keys, categories)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Control id missing from the dispatch table
    #[error("Unknown control: {0}")]
    UnknownControl(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
