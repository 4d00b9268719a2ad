//! Unit Record - one character row of the ratings dataset

use serde::{Deserialize, Deserializer, Serialize};

use super::score::score_value;
use super::vocab::standardize;

/// Deserialize score-like fields that may be JSON strings, numbers or null.
fn raw_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Int(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
    }))
}

/// Per-style review line ("Pace Chaser 4 (Sprint)").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleReview {
    /// Running style reviewed
    #[serde(rename = "type", default)]
    pub style: Option<String>,
    /// Raw score text
    #[serde(default, deserialize_with = "raw_text")]
    pub score: Option<String>,
    /// Distance context, if the review names one
    #[serde(default)]
    pub distance: Option<String>,
}

/// Team trials or parent review block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Raw score text
    #[serde(default, deserialize_with = "raw_text")]
    pub score: Option<String>,
    /// Distance the score applies to
    #[serde(default)]
    pub distance: Option<String>,
    /// Style the score applies to (may be a `/` compound)
    #[serde(default)]
    pub style: Option<String>,
    /// Free-form reviewer note
    #[serde(default)]
    pub note: Option<String>,
}

/// Debuffer block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debuffer {
    /// Debuff kind ("Speed Debuffer")
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Effect strength text
    #[serde(default, deserialize_with = "raw_text")]
    pub effect: Option<String>,
    /// Free-form reviewer note
    #[serde(default)]
    pub note: Option<String>,
}

impl Debuffer {
    /// Whether this block describes an actual debuff.
    #[must_use]
    pub fn is_present(&self) -> bool {
        let filled = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.kind) || filled(&self.effect)
    }
}

/// Awakening level rating (`lv2`..`lv5`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwakeningRating {
    /// Raw score text
    #[serde(default, deserialize_with = "raw_text")]
    pub score: Option<String>,
    /// Style note attached to the score
    #[serde(default)]
    pub style: Option<String>,
    /// Track type note attached to the score
    #[serde(default)]
    pub track_type: Option<String>,
    /// Alternative score under a specific style
    #[serde(default, deserialize_with = "raw_text")]
    pub special_score: Option<String>,
    /// Style the alternative score applies to
    #[serde(default)]
    pub special_style: Option<String>,
}

/// Awakening levels that carry a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Awakening level 2
    Lv2,
    /// Awakening level 3
    Lv3,
    /// Awakening level 4
    Lv4,
    /// Awakening level 5
    Lv5,
}

impl Level {
    /// All rated levels in ascending order.
    pub const ALL: [Self; 4] = [Self::Lv2, Self::Lv3, Self::Lv4, Self::Lv5];

    /// Field name in the dataset (`"lv2"`..`"lv5"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lv2 => "lv2",
            Self::Lv3 => "lv3",
            Self::Lv4 => "lv4",
            Self::Lv5 => "lv5",
        }
    }
}

/// One unit (character) of the dataset.
///
/// Records are immutable once loaded. Only `name` is required; every other
/// field degrades to an empty value so that partial rows still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Display name, unique across the dataset
    pub name: String,
    /// Variant label disambiguating units of the same base character
    #[serde(default)]
    pub variant: Option<String>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Innate distance tags
    #[serde(default)]
    pub innate_distance: Vec<String>,
    /// Innate style tags
    #[serde(default)]
    pub innate_style: Vec<String>,
    /// Per-style reviews in source order
    #[serde(default)]
    pub style_reviews: Vec<StyleReview>,
    /// Team trials review
    #[serde(default)]
    pub trials: Option<Review>,
    /// Parent (inheritance) review
    #[serde(default)]
    pub parent: Option<Review>,
    /// Debuffer review
    #[serde(default)]
    pub debuffer: Option<Debuffer>,
    /// Awakening level 2 rating
    #[serde(default)]
    pub lv2: Option<AwakeningRating>,
    /// Awakening level 3 rating
    #[serde(default)]
    pub lv3: Option<AwakeningRating>,
    /// Awakening level 4 rating
    #[serde(default)]
    pub lv4: Option<AwakeningRating>,
    /// Awakening level 5 rating
    #[serde(default)]
    pub lv5: Option<AwakeningRating>,
}

impl UnitRecord {
    /// Create a record with only a name; every other field empty.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: None,
            description: None,
            innate_distance: Vec::new(),
            innate_style: Vec::new(),
            style_reviews: Vec::new(),
            trials: None,
            parent: None,
            debuffer: None,
            lv2: None,
            lv3: None,
            lv4: None,
            lv5: None,
        }
    }

    /// Base character name (variant suffix stripped).
    #[must_use]
    pub fn base_name(&self) -> &str {
        base_name(&self.name)
    }

    /// `"name [variant]"`, or just the name when there is no variant or
    /// the name already carries the variant suffix.
    #[must_use]
    pub fn labelled_name(&self) -> String {
        match self.variant.as_deref() {
            Some(variant) if !variant.is_empty() && self.base_name() == self.name.trim() => {
                format!("{} [{variant}]", self.name)
            }
            _ => self.name.clone(),
        }
    }

    /// Rating for an awakening level.
    #[must_use]
    pub const fn level(&self, level: Level) -> Option<&AwakeningRating> {
        match level {
            Level::Lv2 => self.lv2.as_ref(),
            Level::Lv3 => self.lv3.as_ref(),
            Level::Lv4 => self.lv4.as_ref(),
            Level::Lv5 => self.lv5.as_ref(),
        }
    }

    /// Integer team trials score.
    #[must_use]
    pub fn trials_score(&self) -> Option<u8> {
        score_value(self.trials.as_ref().and_then(|r| r.score.as_deref()))
    }

    /// Integer parent score.
    #[must_use]
    pub fn parent_score(&self) -> Option<u8> {
        score_value(self.parent.as_ref().and_then(|r| r.score.as_deref()))
    }

    /// Integer debuffer score, read from the effect text.
    #[must_use]
    pub fn debuffer_score(&self) -> Option<u8> {
        score_value(self.debuffer.as_ref().and_then(|d| d.effect.as_deref()))
    }

    /// Integer score for an awakening level.
    #[must_use]
    pub fn level_score(&self, level: Level) -> Option<u8> {
        score_value(self.level(level).and_then(|r| r.score.as_deref()))
    }

    /// Whether the unit has a debuff.
    #[must_use]
    pub fn has_debuff(&self) -> bool {
        self.debuffer.as_ref().is_some_and(Debuffer::is_present)
    }

    /// Style this unit runs in a team.
    ///
    /// The first component of the trials style wins over the first innate
    /// style, both standardized; `"unknown"` when neither exists.
    #[must_use]
    pub fn team_style(&self) -> String {
        let first_component =
            |style: &str| style.split('/').map(str::trim).find(|s| !s.is_empty()).and_then(standardize);
        self.trials
            .as_ref()
            .and_then(|r| r.style.as_deref())
            .and_then(first_component)
            .or_else(|| self.innate_style.first().and_then(|s| first_component(s)))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Strip one trailing `[...]` or `(...)` suffix and trim whitespace.
///
/// # Example
/// ```
/// use uma_planner::unit::base_name;
///
/// assert_eq!(base_name("Unit [Rare]"), "Unit");
/// assert_eq!(base_name("Unit (Summer)"), "Unit");
/// assert_eq!(base_name("Unit"), "Unit");
/// ```
#[must_use]
pub fn base_name(name: &str) -> &str {
    let trimmed = name.trim();
    let open = match trimmed.chars().last() {
        Some(']') => '[',
        Some(')') => '(',
        _ => return trimmed,
    };
    trimmed
        .rfind(open)
        .map_or(trimmed, |start| trimmed[..start].trim())
}
