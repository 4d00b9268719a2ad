//! Team Selection - up to three units per race category

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::unit::base_name;
use crate::unit::vocab::standardize;
use crate::{Error, Result};

/// Maximum units per category.
pub const MAX_SLOTS: usize = 3;

/// Race category of a team slot group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Sprint races
    Sprint,
    /// Mile races
    Mile,
    /// Medium-distance races
    Medium,
    /// Long-distance races
    Long,
    /// Dirt track races
    Dirt,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [Self::Sprint, Self::Mile, Self::Medium, Self::Long, Self::Dirt];

    /// Category name as stored and displayed.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sprint => "Sprint",
            Self::Mile => "Mile",
            Self::Medium => "Medium",
            Self::Long => "Long",
            Self::Dirt => "Dirt",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let canonical = standardize(s).unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == canonical)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "unknown category '{s}' (expected Sprint, Mile, Medium, Long or Dirt)"
                ))
            })
    }
}

/// Team members per category.
///
/// Invariants kept by [`TeamSelection::add`]: at most [`MAX_SLOTS`] names
/// per category, and no two names across all categories share a base name.
///
/// Serializes as `{"Sprint": [...], "Mile": [...], ...}`. Missing
/// categories read as empty and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSelection {
    #[serde(rename = "Sprint", default)]
    sprint: Vec<String>,
    #[serde(rename = "Mile", default)]
    mile: Vec<String>,
    #[serde(rename = "Medium", default)]
    medium: Vec<String>,
    #[serde(rename = "Long", default)]
    long: Vec<String>,
    #[serde(rename = "Dirt", default)]
    dirt: Vec<String>,
}

impl TeamSelection {
    /// Create an empty selection (all five categories empty).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Members of a category in slot order.
    #[must_use]
    pub fn slots(&self, category: Category) -> &[String] {
        match category {
            Category::Sprint => &self.sprint,
            Category::Mile => &self.mile,
            Category::Medium => &self.medium,
            Category::Long => &self.long,
            Category::Dirt => &self.dirt,
        }
    }

    fn slots_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Sprint => &mut self.sprint,
            Category::Mile => &mut self.mile,
            Category::Medium => &mut self.medium,
            Category::Long => &mut self.long,
            Category::Dirt => &mut self.dirt,
        }
    }

    /// Every member with its category, in category then slot order.
    pub fn members(&self) -> impl Iterator<Item = (Category, &str)> {
        Category::ALL.into_iter().flat_map(move |category| {
            self.slots(category)
                .iter()
                .map(move |name| (category, name.as_str()))
        })
    }

    /// Total number of members across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|&c| self.slots(c).len()).sum()
    }

    /// Check if no category has members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this exact unit name is on the team.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.members().any(|(_, member)| member == name)
    }

    /// Member sharing the given base name, if any.
    #[must_use]
    pub fn member_with_base(&self, base: &str) -> Option<(Category, &str)> {
        self.members()
            .find(|(_, member)| base_name(member) == base)
    }

    /// Validate that `name` could be added to `category`.
    ///
    /// # Errors
    /// - [`Error::DuplicateBaseName`] if any member shares the base name
    /// - [`Error::CategoryFull`] if the category already has [`MAX_SLOTS`]
    pub fn check_add(&self, name: &str, category: Category) -> Result<()> {
        let base = base_name(name);
        if let Some((_, existing)) = self.member_with_base(base) {
            return Err(Error::DuplicateBaseName {
                base_name: base.to_string(),
                existing: existing.to_string(),
            });
        }
        if self.slots(category).len() >= MAX_SLOTS {
            return Err(Error::CategoryFull {
                category: category.to_string(),
                max: MAX_SLOTS,
            });
        }
        Ok(())
    }

    /// Append `name` to `category`.
    ///
    /// # Errors
    /// Same as [`TeamSelection::check_add`]; the selection is unchanged on
    /// error.
    pub fn add(&mut self, name: impl Into<String>, category: Category) -> Result<()> {
        let name = name.into();
        self.check_add(&name, category)?;
        self.slots_mut(category).push(name);
        Ok(())
    }

    /// Remove and return the member at `index` of `category`.
    ///
    /// # Errors
    /// Returns [`Error::SlotOutOfRange`] if the slot is not filled.
    pub fn remove(&mut self, category: Category, index: usize) -> Result<String> {
        let slots = self.slots_mut(category);
        if index >= slots.len() {
            return Err(Error::SlotOutOfRange {
                category: category.to_string(),
                index,
                len: slots.len(),
            });
        }
        Ok(slots.remove(index))
    }

    /// Check both invariants by replaying every member through
    /// [`TeamSelection::add`].
    ///
    /// Deserialized selections (imports, stored records) skip `add`, so they
    /// go through this before being trusted.
    ///
    /// # Errors
    /// Returns the first [`Error::CategoryFull`] or
    /// [`Error::DuplicateBaseName`] the replay hits.
    pub fn validate(&self) -> Result<()> {
        let mut replay = Self::new();
        for (category, name) in self.members() {
            replay.add(name, category)?;
        }
        Ok(())
    }
}
