//! Column sorting
//!
//! Every key maps a unit to a [`SortValue`]; the sort is stable, so ties
//! keep their input order in both directions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::state::OwnedSet;
use crate::unit::score::sort_score;
use crate::unit::{Level, UnitRecord};
use crate::{Error, Result};

/// Sort order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order (smallest first)
    #[default]
    Ascending,
    /// Descending order (largest first)
    Descending,
}

impl SortOrder {
    /// The opposite order.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Owned flag (not owned first)
    Owned,
    /// Unit name, case-insensitive
    Name,
    /// Variant label, case-insensitive
    Variant,
    /// Team trials score
    Trials,
    /// Parent score
    Parent,
    /// Debuffer score
    Debuffer,
    /// Awakening level score
    Level(Level),
}

impl SortKey {
    /// All sortable columns in table order.
    pub const ALL: [Self; 10] = [
        Self::Owned,
        Self::Name,
        Self::Variant,
        Self::Trials,
        Self::Parent,
        Self::Debuffer,
        Self::Level(Level::Lv2),
        Self::Level(Level::Lv3),
        Self::Level(Level::Lv4),
        Self::Level(Level::Lv5),
    ];

    /// Column id used by headers and the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owned => "owned",
            Self::Name => "name",
            Self::Variant => "variant",
            Self::Trials => "trials",
            Self::Parent => "parent",
            Self::Debuffer => "debuffer",
            Self::Level(level) => level.as_str(),
        }
    }

    fn value(self, unit: &UnitRecord, owned: &OwnedSet) -> SortValue {
        match self {
            Self::Owned => SortValue::Number(u8::from(owned.is_owned(&unit.name))),
            Self::Name => SortValue::Text(unit.name.to_lowercase()),
            Self::Variant => {
                SortValue::Text(unit.variant.as_deref().unwrap_or_default().to_lowercase())
            }
            Self::Trials => SortValue::Number(sort_score(
                unit.trials.as_ref().and_then(|r| r.score.as_deref()),
            )),
            Self::Parent => SortValue::Number(sort_score(
                unit.parent.as_ref().and_then(|r| r.score.as_deref()),
            )),
            Self::Debuffer => SortValue::Number(sort_score(
                unit.debuffer.as_ref().and_then(|d| d.effect.as_deref()),
            )),
            Self::Level(level) => SortValue::Number(sort_score(
                unit.level(level).and_then(|r| r.score.as_deref()),
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "debuff" {
            return Ok(Self::Debuffer);
        }
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("'{s}' is not a sortable column")))
    }
}

/// Comparable projection of one column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Number(u8),
    Text(String),
}

/// Header sort state: which column, which direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    /// Active column, `None` for dataset order
    pub key: Option<SortKey>,
    /// Direction for the active column
    pub order: SortOrder,
}

impl SortState {
    /// Header click: the same column flips direction, a new column starts
    /// ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.order = self.order.flipped();
        } else {
            self.key = Some(key);
            self.order = SortOrder::Ascending;
        }
    }
}

/// Sorted copy of `units` by one column.
///
/// The input is not modified. Missing or unparseable scores sort as 0.
#[must_use]
pub fn sort_units<'u>(
    units: &'u [UnitRecord],
    key: SortKey,
    order: SortOrder,
    owned: &OwnedSet,
) -> Vec<&'u UnitRecord> {
    let mut keyed: Vec<(SortValue, &UnitRecord)> =
        units.iter().map(|unit| (key.value(unit, owned), unit)).collect();

    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| order.apply(a.cmp(b)));

    keyed.into_iter().map(|(_, unit)| unit).collect()
}
