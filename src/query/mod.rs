//! Filter and sort engine
//!
//! Filtering is a linear predicate scan that keeps input order; sorting is
//! a stable comparator over a fixed set of keys. Both return borrowed views
//! of the dataset and never mutate it.
//!
//! ## Combination rules
//!
//! - All active criteria combine with AND
//! - Values inside one multi-select criterion combine with OR
//! - Empty criteria pass everything
//!
//! ```rust
//! use uma_planner::query::{apply_filters, FilterCriteria};
//! use uma_planner::state::{OwnedSet, TeamSelection};
//! use uma_planner::Dataset;
//!
//! # fn main() -> uma_planner::Result<()> {
//! let dataset = Dataset::from_json(
//!     r#"[{"name": "A", "innate_distance": ["Sprint"]},
//!         {"name": "B", "innate_distance": ["Mile"]}]"#,
//! )?;
//! let criteria = FilterCriteria {
//!     distances: vec!["Sprint".to_string()],
//!     ..FilterCriteria::default()
//! };
//! let view = apply_filters(dataset.units(), &criteria, &OwnedSet::new(), &TeamSelection::new());
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].name, "A");
//! # Ok(())
//! # }
//! ```

mod filter;
mod sort;

pub use filter::apply_filters;
pub use sort::{sort_units, SortKey, SortOrder, SortState};

use std::str::FromStr;

use crate::unit::vocab::standardize;
use crate::{Error, Result};

/// Three-way filter: don't care, must hold, must not hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriState {
    /// Pass every unit
    #[default]
    Any,
    /// Pass units where the property holds
    Yes,
    /// Pass units where the property does not hold
    No,
}

impl TriState {
    /// Whether a unit with the given property value passes.
    #[must_use]
    pub const fn accepts(self, value: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Yes => value,
            Self::No => !value,
        }
    }

    /// Filter value as shown in the UI.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl FromStr for TriState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" | "all" => Ok(Self::Any),
            "yes" | "y" | "true" | "present" | "owned" | "in" => Ok(Self::Yes),
            "no" | "n" | "false" | "absent" | "not-owned" | "out" => Ok(Self::No),
            other => Err(Error::InvalidInput(format!(
                "'{other}' is not a filter state (expected any, yes or no)"
            ))),
        }
    }
}

/// Active filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Free-text search over name, variant and `"name [variant]"`
    pub search: String,
    /// Distance tags (OR)
    pub distances: Vec<String>,
    /// Style tags (OR)
    pub styles: Vec<String>,
    /// Team trials scores (OR)
    pub trial_scores: Vec<u8>,
    /// Parent scores (OR)
    pub parent_scores: Vec<u8>,
    /// Debuff presence
    pub debuff: TriState,
    /// Owned status
    pub owned: TriState,
    /// Team membership
    pub in_team: TriState,
}

impl FilterCriteria {
    /// Whether no criterion is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.distances.is_empty()
            && self.styles.is_empty()
            && self.trial_scores.is_empty()
            && self.parent_scores.is_empty()
            && self.debuff == TriState::Any
            && self.owned == TriState::Any
            && self.in_team == TriState::Any
    }

    /// Reset every criterion.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Parse a comma-separated tag list, standardizing each tag.
///
/// `"sprint, Med."` -> `["Sprint", "Medium"]`. Blank input is an empty list.
#[must_use]
pub fn parse_tags(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in value.split(',').filter_map(standardize) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Parse a comma-separated score list (`"4,5"`).
///
/// # Errors
/// Returns [`Error::InvalidInput`] if an entry is not an integer 1..=5.
pub fn parse_scores(value: &str) -> Result<Vec<u8>> {
    let mut scores = Vec::new();
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let score: u8 = part
            .parse()
            .ok()
            .filter(|s| (1..=5).contains(s))
            .ok_or_else(|| Error::InvalidInput(format!("'{part}' is not a score from 1 to 5")))?;
        if !scores.contains(&score) {
            scores.push(score);
        }
    }
    Ok(scores)
}
