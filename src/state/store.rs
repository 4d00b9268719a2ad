//! Persistent Store - planner state on top of a [`KvStore`]
//!
//! Two records live under fixed keys:
//!
//! ```text
//! ownedUmas      -> OwnedSet       {"Unit": true, ...}
//! teamSelection  -> TeamSelection  {"Sprint": [...], ..., "Dirt": [...]}
//! ```

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{OwnedSet, TeamSelection};
use crate::kv::KvStore;
use crate::{Error, Result};

/// Key of the owned-set record.
pub const OWNED_KEY: &str = "ownedUmas";

/// Key of the team-selection record.
pub const TEAM_KEY: &str = "teamSelection";

/// Export/import document bundling both records.
///
/// On import, a field that is absent leaves the stored record untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    /// Owned set, if included
    #[serde(rename = "ownedUmas", default, skip_serializing_if = "Option::is_none")]
    pub owned: Option<OwnedSet>,
    /// Team selection, if included
    #[serde(rename = "teamSelection", default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamSelection>,
    /// When the document was produced
    #[serde(rename = "exportedAt", default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

impl ExportBundle {
    /// Parse an import document.
    ///
    /// # Errors
    /// Returns [`Error::ImportError`] carrying the parse message if the text
    /// is not a JSON object of the export shape.
    ///
    /// A team that breaks the slot limit or repeats a base name is rejected
    /// the same way.
    pub fn from_json(text: &str) -> Result<Self> {
        let bundle: Self =
            serde_json::from_str(text).map_err(|e| Error::ImportError(e.to_string()))?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Check the bundled team against the team invariants.
    ///
    /// # Errors
    /// Returns [`Error::ImportError`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if let Some(team) = &self.team {
            team.validate()
                .map_err(|e| Error::ImportError(format!("invalid teamSelection: {e}")))?;
        }
        Ok(())
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Typed access to the planner records of a key-value backend.
#[derive(Debug)]
pub struct PersistentStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> PersistentStore<S> {
    /// Wrap a key-value backend.
    #[must_use]
    pub const fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Get reference to the backend (for inspection/testing)
    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.kv
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let Some(text) = self.kv.get(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "stored record is unreadable, starting empty");
                Ok(T::default())
            }
        }
    }

    fn save_value<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.kv.set(key, &text)?;
        debug!(key, bytes = text.len(), "saved record");
        Ok(())
    }

    /// Load the owned set (empty if never saved).
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    pub fn load_owned(&self) -> Result<OwnedSet> {
        self.load_or_default(OWNED_KEY)
    }

    /// Overwrite the stored owned set.
    ///
    /// # Errors
    /// Returns error if the backend write fails.
    pub fn save_owned(&self, owned: &OwnedSet) -> Result<()> {
        self.save_value(OWNED_KEY, owned)
    }

    /// Load the team selection (five empty categories if never saved).
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    pub fn load_team(&self) -> Result<TeamSelection> {
        self.load_or_default(TEAM_KEY)
    }

    /// Overwrite the stored team selection.
    ///
    /// # Errors
    /// Returns error if the backend write fails.
    pub fn save_team(&self, team: &TeamSelection) -> Result<()> {
        self.save_value(TEAM_KEY, team)
    }

    /// Bundle both stored records into an export document.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    pub fn export(&self) -> Result<ExportBundle> {
        let bundle = ExportBundle {
            owned: Some(self.load_owned()?),
            team: Some(self.load_team()?),
            exported_at: Some(Utc::now()),
        };
        info!("exported planner state");
        Ok(bundle)
    }

    /// Replace whichever records the document carries.
    ///
    /// The bundle is validated before anything is written. If the team write
    /// fails after the owned set was replaced, the previous owned record is
    /// put back.
    ///
    /// # Errors
    /// Returns [`Error::ImportError`] for an invalid team, or the backend
    /// error if a write fails.
    pub fn import(&self, bundle: &ExportBundle) -> Result<()> {
        bundle.validate()?;

        let previous_owned = self.kv.get(OWNED_KEY)?;
        if let Some(owned) = &bundle.owned {
            self.save_owned(owned)?;
        }
        if let Some(team) = &bundle.team {
            if let Err(e) = self.save_team(team) {
                if bundle.owned.is_some() {
                    self.restore(OWNED_KEY, previous_owned.as_deref());
                }
                return Err(e);
            }
        }
        info!(
            owned = bundle.owned.is_some(),
            team = bundle.team.is_some(),
            "imported planner state"
        );
        Ok(())
    }

    fn restore(&self, key: &str, previous: Option<&str>) {
        let restored = match previous {
            Some(text) => self.kv.set(key, text),
            None => self.kv.delete(key),
        };
        if let Err(e) = restored {
            warn!(key, error = %e, "could not restore record after failed import");
        }
    }

    /// Delete both records, returning the store to its never-saved state.
    ///
    /// # Errors
    /// Returns error if a backend delete fails.
    pub fn reset(&self) -> Result<()> {
        self.kv.delete(OWNED_KEY)?;
        self.kv.delete(TEAM_KEY)?;
        info!("reset planner state");
        Ok(())
    }
}
