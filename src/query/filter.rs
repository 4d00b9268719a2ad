//! Predicate scan over the dataset

use rustc_hash::FxHashSet;

use super::FilterCriteria;
use crate::state::{OwnedSet, TeamSelection};
use crate::unit::UnitRecord;

/// Criteria prepared once per scan (lower-cased search, hashed selections).
struct CompiledFilter<'a> {
    search: Option<String>,
    distances: FxHashSet<&'a str>,
    styles: FxHashSet<&'a str>,
    trial_scores: &'a [u8],
    parent_scores: &'a [u8],
    criteria: &'a FilterCriteria,
    owned: &'a OwnedSet,
    team_names: FxHashSet<&'a str>,
}

impl<'a> CompiledFilter<'a> {
    fn new(criteria: &'a FilterCriteria, owned: &'a OwnedSet, team: &'a TeamSelection) -> Self {
        let search = criteria.search.trim();
        Self {
            search: (!search.is_empty()).then(|| search.to_lowercase()),
            distances: criteria.distances.iter().map(String::as_str).collect(),
            styles: criteria.styles.iter().map(String::as_str).collect(),
            trial_scores: &criteria.trial_scores,
            parent_scores: &criteria.parent_scores,
            criteria,
            owned,
            team_names: team.members().map(|(_, name)| name).collect(),
        }
    }

    fn matches_search(&self, unit: &UnitRecord) -> bool {
        let Some(needle) = &self.search else {
            return true;
        };
        let variant = unit.variant.as_deref().unwrap_or_default();
        unit.name.to_lowercase().contains(needle.as_str())
            || variant.to_lowercase().contains(needle.as_str())
            || format!("{} [{variant}]", unit.name)
                .to_lowercase()
                .contains(needle.as_str())
    }

    fn matches_tags(selection: &FxHashSet<&str>, tags: &[String]) -> bool {
        selection.is_empty() || tags.iter().any(|tag| selection.contains(tag.as_str()))
    }

    fn matches_score(selection: &[u8], score: Option<u8>) -> bool {
        selection.is_empty() || score.is_some_and(|s| selection.contains(&s))
    }

    fn matches(&self, unit: &UnitRecord) -> bool {
        self.matches_search(unit)
            && Self::matches_tags(&self.distances, &unit.innate_distance)
            && Self::matches_tags(&self.styles, &unit.innate_style)
            && Self::matches_score(self.trial_scores, unit.trials_score())
            && Self::matches_score(self.parent_scores, unit.parent_score())
            && self.criteria.debuff.accepts(unit.has_debuff())
            && self.criteria.owned.accepts(self.owned.is_owned(&unit.name))
            && self
                .criteria
                .in_team
                .accepts(self.team_names.contains(unit.name.as_str()))
    }
}

/// Keep the units that satisfy every active criterion, in input order.
///
/// # Arguments
/// * `units` - Units to scan (the dataset, or an already-sorted view of it)
/// * `criteria` - Active criteria; empty criteria pass everything
/// * `owned` - Owned set consulted by the owned-status criterion
/// * `team` - Team selection consulted by the team-membership criterion
#[must_use]
pub fn apply_filters<'u, I>(
    units: I,
    criteria: &FilterCriteria,
    owned: &OwnedSet,
    team: &TeamSelection,
) -> Vec<&'u UnitRecord>
where
    I: IntoIterator<Item = &'u UnitRecord>,
{
    let filter = CompiledFilter::new(criteria, owned, team);
    units.into_iter().filter(|unit| filter.matches(unit)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::TriState;
    use crate::state::Category;
    use crate::unit::{Debuffer, Review};

    fn unit(name: &str, variant: Option<&str>, distances: &[&str], styles: &[&str]) -> UnitRecord {
        let mut record = UnitRecord::new(name);
        record.variant = variant.map(str::to_string);
        record.innate_distance = distances.iter().map(|s| (*s).to_string()).collect();
        record.innate_style = styles.iter().map(|s| (*s).to_string()).collect();
        record
    }

    fn names(view: &[&UnitRecord]) -> Vec<String> {
        view.iter().map(|u| u.name.clone()).collect()
    }

    fn sample() -> Vec<UnitRecord> {
        let mut a = unit("Alpha", Some("Original"), &["Sprint"], &["Front Runner"]);
        a.trials = Some(Review {
            score: Some("4".to_string()),
            ..Review::default()
        });
        let mut b = unit("Bravo [Summer]", Some("Summer"), &["Mile", "Medium"], &["Pace Chaser"]);
        b.parent = Some(Review {
            score: Some("5?".to_string()),
            ..Review::default()
        });
        b.debuffer = Some(Debuffer {
            kind: Some("Speed".to_string()),
            ..Debuffer::default()
        });
        let c = unit("Charlie", None, &["Long"], &["End Closer", "Late Surger"]);
        vec![a, b, c]
    }

    #[test]
    fn test_empty_criteria_passes_all_in_order() {
        let units = sample();
        let view = apply_filters(&units, &FilterCriteria::default(), &OwnedSet::new(), &TeamSelection::new());
        assert_eq!(names(&view), vec!["Alpha", "Bravo [Summer]", "Charlie"]);
    }

    #[test]
    fn test_search_matches_name_variant_and_label() {
        let units = sample();
        let owned = OwnedSet::new();
        let team = TeamSelection::new();
        let search = |text: &str| {
            let criteria = FilterCriteria {
                search: text.to_string(),
                ..FilterCriteria::default()
            };
            names(&apply_filters(&units, &criteria, &owned, &team))
        };

        assert_eq!(search("ALPHA"), vec!["Alpha"]);
        assert_eq!(search("summer"), vec!["Bravo [Summer]"]);
        assert_eq!(search("alpha [orig"), vec!["Alpha"]);
        assert!(search("zulu").is_empty());
    }

    #[test]
    fn test_multi_select_is_union() {
        let units = sample();
        let criteria = FilterCriteria {
            distances: vec!["Sprint".to_string(), "Long".to_string()],
            ..FilterCriteria::default()
        };
        let view = apply_filters(&units, &criteria, &OwnedSet::new(), &TeamSelection::new());
        assert_eq!(names(&view), vec!["Alpha", "Charlie"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let units = sample();
        let criteria = FilterCriteria {
            distances: vec!["Sprint".to_string(), "Long".to_string()],
            styles: vec!["Late Surger".to_string()],
            ..FilterCriteria::default()
        };
        let view = apply_filters(&units, &criteria, &OwnedSet::new(), &TeamSelection::new());
        assert_eq!(names(&view), vec!["Charlie"]);
    }

    #[test]
    fn test_score_filters_use_first_digit() {
        let units = sample();
        let owned = OwnedSet::new();
        let team = TeamSelection::new();

        let trials = FilterCriteria {
            trial_scores: vec![4],
            ..FilterCriteria::default()
        };
        assert_eq!(names(&apply_filters(&units, &trials, &owned, &team)), vec!["Alpha"]);

        let parent = FilterCriteria {
            parent_scores: vec![5, 1],
            ..FilterCriteria::default()
        };
        assert_eq!(
            names(&apply_filters(&units, &parent, &owned, &team)),
            vec!["Bravo [Summer]"]
        );
    }

    #[test]
    fn test_tristate_filters() {
        let units = sample();
        let mut owned = OwnedSet::new();
        owned.set("Charlie", true);
        let mut team = TeamSelection::new();
        team.add("Alpha", Category::Sprint).unwrap();

        let debuff = FilterCriteria {
            debuff: TriState::No,
            ..FilterCriteria::default()
        };
        assert_eq!(names(&apply_filters(&units, &debuff, &owned, &team)), vec!["Alpha", "Charlie"]);

        let owned_only = FilterCriteria {
            owned: TriState::Yes,
            ..FilterCriteria::default()
        };
        assert_eq!(names(&apply_filters(&units, &owned_only, &owned, &team)), vec!["Charlie"]);

        let not_in_team = FilterCriteria {
            in_team: TriState::No,
            ..FilterCriteria::default()
        };
        assert_eq!(
            names(&apply_filters(&units, &not_in_team, &owned, &team)),
            vec!["Bravo [Summer]", "Charlie"]
        );
    }
}
