//! Team planner summaries
//!
//! Constraint enforcement lives in [`TeamSelection`]; this module derives
//! the per-category style tallies shown next to each slot group.

use crate::state::{Category, TeamSelection};
use crate::unit::vocab::{style_abbreviation, STYLES};
use crate::Dataset;

/// Style tally of one category: `(abbreviation, count)` pairs.
///
/// Canonical styles come first in FR, PC, LS, EC order, then any other
/// style in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSummary {
    counts: Vec<(String, usize)>,
}

impl StyleSummary {
    fn bump(&mut self, abbreviation: String) {
        match self.counts.iter_mut().find(|(abbr, _)| *abbr == abbreviation) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((abbreviation, 1)),
        }
    }

    /// Count for one abbreviation (0 if absent).
    #[must_use]
    pub fn count(&self, abbreviation: &str) -> usize {
        self.counts
            .iter()
            .find(|(abbr, _)| abbr == abbreviation)
            .map_or(0, |(_, count)| *count)
    }

    /// `(abbreviation, count)` pairs in display order.
    #[must_use]
    pub fn counts(&self) -> &[(String, usize)] {
        &self.counts
    }

    /// Check if no slot is filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Tally the styles used by the members of `category`.
///
/// A member missing from the dataset counts as `"unknown"`.
#[must_use]
pub fn style_summary(team: &TeamSelection, category: Category, dataset: &Dataset) -> StyleSummary {
    let mut raw = StyleSummary::default();
    for name in team.slots(category) {
        let style = dataset
            .get(name)
            .map_or_else(|| "unknown".to_string(), |unit| unit.team_style());
        raw.bump(style_abbreviation(&style));
    }

    let canonical: Vec<String> = STYLES.iter().map(|s| style_abbreviation(s)).collect();
    let mut summary = StyleSummary::default();
    for abbr in &canonical {
        let count = raw.count(abbr);
        if count > 0 {
            summary.counts.push((abbr.clone(), count));
        }
    }
    summary.counts.extend(
        raw.counts
            .into_iter()
            .filter(|(abbr, _)| !canonical.contains(abbr)),
    );
    summary
}
