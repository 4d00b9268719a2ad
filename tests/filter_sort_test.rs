//! Filter and sort engine against the sample dataset

use uma_planner::query::{apply_filters, sort_units, FilterCriteria, SortKey, SortOrder, TriState};
use uma_planner::state::{Category, OwnedSet, TeamSelection};
use uma_planner::unit::{Level, UnitRecord};
use uma_planner::Dataset;

const SAMPLE: &str = include_str!("../data/sample_units.json");

fn sample() -> Dataset {
    Dataset::from_json(SAMPLE).unwrap()
}

fn names(units: &[&UnitRecord]) -> Vec<String> {
    units.iter().map(|u| u.name.clone()).collect()
}

fn filter(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<String> {
    names(&apply_filters(
        dataset.units(),
        criteria,
        &OwnedSet::new(),
        &TeamSelection::new(),
    ))
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_empty_criteria_keeps_dataset_order() {
    let dataset = sample();
    let all = filter(&dataset, &FilterCriteria::default());
    assert_eq!(all.len(), dataset.len());
    assert_eq!(all[0], "Special Week");
    assert_eq!(all[7], "Oguri Cap (Christmas)");
}

#[test]
fn test_distance_tags_are_or() {
    let dataset = sample();
    let criteria = FilterCriteria {
        distances: vec!["Sprint".to_string()],
        ..FilterCriteria::default()
    };
    assert_eq!(filter(&dataset, &criteria), vec!["Sakura Bakushin O", "Haru Urara"]);

    let criteria = FilterCriteria {
        distances: vec!["Sprint".to_string(), "Long".to_string()],
        ..FilterCriteria::default()
    };
    assert_eq!(
        filter(&dataset, &criteria),
        vec!["Special Week", "Gold Ship", "Sakura Bakushin O", "Haru Urara", "Oguri Cap"]
    );
}

#[test]
fn test_criteria_are_and() {
    let dataset = sample();
    let criteria = FilterCriteria {
        distances: vec!["Mile".to_string()],
        styles: vec!["Front Runner".to_string()],
        ..FilterCriteria::default()
    };
    assert_eq!(filter(&dataset, &criteria), vec!["Silence Suzuka"]);
}

#[test]
fn test_score_filters_skip_missing_scores() {
    let dataset = sample();
    let criteria = FilterCriteria {
        trial_scores: vec![5],
        ..FilterCriteria::default()
    };
    assert_eq!(
        filter(&dataset, &criteria),
        vec!["Special Week [Summer]", "Silence Suzuka"]
    );

    let criteria = FilterCriteria {
        parent_scores: vec![1, 2, 3, 4, 5],
        ..FilterCriteria::default()
    };
    let kept = filter(&dataset, &criteria);
    assert_eq!(kept.len(), 7);
    assert!(!kept.contains(&"Haru Urara".to_string()));
}

#[test]
fn test_debuff_tristate() {
    let dataset = sample();
    let yes = FilterCriteria {
        debuff: TriState::Yes,
        ..FilterCriteria::default()
    };
    assert_eq!(
        filter(&dataset, &yes),
        vec!["Silence Suzuka", "Gold Ship", "Oguri Cap"]
    );

    let no = FilterCriteria {
        debuff: TriState::No,
        ..FilterCriteria::default()
    };
    assert_eq!(filter(&dataset, &no).len(), 5);
}

#[test]
fn test_search_matches_name_and_variant() {
    let dataset = sample();
    let search = |text: &str| {
        filter(
            &dataset,
            &FilterCriteria {
                search: text.to_string(),
                ..FilterCriteria::default()
            },
        )
    };
    assert_eq!(search("SUMMER"), vec!["Special Week [Summer]"]);
    assert_eq!(search("oguri"), vec!["Oguri Cap", "Oguri Cap (Christmas)"]);
    assert_eq!(search("christmas"), vec!["Oguri Cap (Christmas)"]);
    assert!(search("nobody").is_empty());
}

#[test]
fn test_owned_and_team_filters() {
    let dataset = sample();
    let mut owned = OwnedSet::new();
    owned.set("Gold Ship", true);
    owned.set("Haru Urara", false);
    let mut team = TeamSelection::new();
    team.add("Haru Urara", Category::Dirt).unwrap();

    let owned_only = FilterCriteria {
        owned: TriState::Yes,
        ..FilterCriteria::default()
    };
    assert_eq!(
        names(&apply_filters(dataset.units(), &owned_only, &owned, &team)),
        vec!["Gold Ship"]
    );

    let in_team = FilterCriteria {
        in_team: TriState::Yes,
        ..FilterCriteria::default()
    };
    assert_eq!(
        names(&apply_filters(dataset.units(), &in_team, &owned, &team)),
        vec!["Haru Urara"]
    );
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_trials_descending_is_stable() {
    let dataset = sample();
    let sorted = sort_units(dataset.units(), SortKey::Trials, SortOrder::Descending, &OwnedSet::new());
    assert_eq!(
        names(&sorted),
        vec![
            "Special Week [Summer]",
            "Silence Suzuka",
            "Special Week",
            "Sakura Bakushin O",
            "Oguri Cap",
            "Gold Ship",
            "Oguri Cap (Christmas)",
            "Haru Urara",
        ]
    );
}

#[test]
fn test_sort_level_uses_first_digit() {
    let dataset = sample();
    let sorted = sort_units(
        dataset.units(),
        SortKey::Level(Level::Lv4),
        SortOrder::Ascending,
        &OwnedSet::new(),
    );
    assert_eq!(
        names(&sorted)[..3],
        ["Gold Ship", "Haru Urara", "Special Week"]
    );
}

#[test]
fn test_sort_debuffer_missing_is_zero() {
    let dataset = sample();
    let sorted = sort_units(dataset.units(), SortKey::Debuffer, SortOrder::Ascending, &OwnedSet::new());
    assert_eq!(
        names(&sorted)[5..],
        ["Silence Suzuka", "Oguri Cap", "Gold Ship"]
    );
}

#[test]
fn test_sort_name_case_insensitive() {
    let dataset = sample();
    let sorted = sort_units(dataset.units(), SortKey::Name, SortOrder::Ascending, &OwnedSet::new());
    assert_eq!(
        names(&sorted),
        vec![
            "Gold Ship",
            "Haru Urara",
            "Oguri Cap",
            "Oguri Cap (Christmas)",
            "Sakura Bakushin O",
            "Silence Suzuka",
            "Special Week",
            "Special Week [Summer]",
        ]
    );
}

#[test]
fn test_sort_owned_puts_unowned_first() {
    let dataset = sample();
    let mut owned = OwnedSet::new();
    owned.set("Special Week", true);
    let sorted = sort_units(dataset.units(), SortKey::Owned, SortOrder::Ascending, &owned);
    assert_eq!(sorted.last().unwrap().name, "Special Week");
    assert_eq!(sorted[0].name, "Special Week [Summer]");
}

#[test]
fn test_sort_then_filter_keeps_sort_order() {
    let dataset = sample();
    let owned = OwnedSet::new();
    let team = TeamSelection::new();
    let sorted = sort_units(dataset.units(), SortKey::Parent, SortOrder::Descending, &owned);
    let criteria = FilterCriteria {
        distances: vec!["Medium".to_string()],
        ..FilterCriteria::default()
    };
    let view = apply_filters(sorted, &criteria, &owned, &team);
    assert_eq!(
        names(&view),
        vec![
            "Silence Suzuka",
            "Oguri Cap",
            "Special Week",
            "Oguri Cap (Christmas)",
            "Special Week [Summer]",
        ]
    );
}
