//! Owned Set - which units the player owns

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from unit name to "owned" flag.
///
/// A name that was never toggled reads as not owned. Serializes as a plain
/// JSON object (`{"Unit": true}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnedSet {
    flags: BTreeMap<String, bool>,
}

impl OwnedSet {
    /// Create an empty owned set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the unit is marked as owned.
    #[must_use]
    pub fn is_owned(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Set the owned flag for a unit.
    pub fn set(&mut self, name: impl Into<String>, owned: bool) {
        self.flags.insert(name.into(), owned);
    }

    /// Flip the owned flag for a unit and return the new value.
    pub fn toggle(&mut self, name: &str) -> bool {
        let owned = !self.is_owned(name);
        self.set(name, owned);
        owned
    }

    /// Names currently marked as owned, in name order.
    pub fn owned_names(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, &owned)| owned)
            .map(|(name, _)| name.as_str())
    }

    /// Number of units marked as owned.
    #[must_use]
    pub fn owned_count(&self) -> usize {
        self.flags.values().filter(|&&owned| owned).count()
    }
}
