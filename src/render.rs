//! Table renderer
//!
//! Projects units to rows of badges and lays them out as a plain-text
//! table. There is no diffing: callers render the whole table again after
//! every filter, sort or state change.

use std::fmt;

use crate::planner::style_summary;
use crate::query::{SortKey, SortOrder, SortState};
use crate::state::{Category, OwnedSet, TeamSelection, MAX_SLOTS};
use crate::unit::score::{classify, score_value, ScoreShape};
use crate::unit::vocab::{standardize, style_abbreviation};
use crate::unit::{AwakeningRating, Level, UnitRecord};
use crate::Dataset;

/// Badge shown when a field is missing.
pub const PLACEHOLDER: &str = "-";

/// Column headers, with the sort key each header toggles.
pub const COLUMNS: [(&str, Option<SortKey>); 13] = [
    ("Own", Some(SortKey::Owned)),
    ("Name", Some(SortKey::Name)),
    ("Variant", Some(SortKey::Variant)),
    ("Distance", None),
    ("Style", None),
    ("Trials", Some(SortKey::Trials)),
    ("Parent", Some(SortKey::Parent)),
    ("Debuff", Some(SortKey::Debuffer)),
    ("Lv2", Some(SortKey::Level(Level::Lv2))),
    ("Lv3", Some(SortKey::Level(Level::Lv3))),
    ("Lv4", Some(SortKey::Level(Level::Lv4))),
    ("Lv5", Some(SortKey::Level(Level::Lv5))),
    ("Team", None),
];

/// Score badge: the integer score, `?` appended when the source was unsure.
#[must_use]
pub fn score_badge(raw: Option<&str>) -> String {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return PLACEHOLDER.to_string();
    };
    match score_value(Some(text)) {
        Some(score) if classify(text) == ScoreShape::Uncertain => format!("{score}?"),
        Some(score) => score.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

fn style_tag(style: &str) -> String {
    standardize(style)
        .map(|s| s.split('/').map(style_abbreviation).collect::<Vec<_>>().join("/"))
        .unwrap_or_default()
}

fn awakening_badge(rating: Option<&AwakeningRating>) -> String {
    let Some(rating) = rating else {
        return PLACEHOLDER.to_string();
    };
    let mut badge = score_badge(rating.score.as_deref());
    if badge == PLACEHOLDER {
        return badge;
    }
    if let Some(special) = rating.special_score.as_deref() {
        let style = rating.special_style.as_deref().map(style_tag).unwrap_or_default();
        badge = format!("{badge} ({} {style})", score_badge(Some(special)))
            .replace(" )", ")");
    } else if let Some(track) = rating.track_type.as_deref() {
        badge = format!("{badge} ({track})");
    } else if let Some(style) = rating.style.as_deref() {
        badge = format!("{badge} ({})", style_tag(style));
    }
    badge
}

fn trials_badge(unit: &UnitRecord) -> String {
    let Some(trials) = &unit.trials else {
        return PLACEHOLDER.to_string();
    };
    let badge = score_badge(trials.score.as_deref());
    match trials.style.as_deref().map(style_tag) {
        Some(style) if badge != PLACEHOLDER && !style.is_empty() => format!("{badge} {style}"),
        _ => badge,
    }
}

fn debuff_badge(unit: &UnitRecord) -> String {
    match &unit.debuffer {
        Some(debuffer) if debuffer.is_present() => {
            let kind = debuffer.kind.as_deref().unwrap_or("Debuff");
            match debuffer.effect.as_deref() {
                Some(effect) if !effect.trim().is_empty() => format!("{kind} {}", effect.trim()),
                _ => kind.to_string(),
            }
        }
        _ => PLACEHOLDER.to_string(),
    }
}

fn tags(values: &[String], abbreviate: bool) -> String {
    if values.is_empty() {
        return PLACEHOLDER.to_string();
    }
    values
        .iter()
        .map(|v| if abbreviate { style_tag(v) } else { v.clone() })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cell text, one per entry of [`COLUMNS`]
    pub cells: Vec<String>,
}

/// Project a unit to its row of badges.
#[must_use]
pub fn project_row(unit: &UnitRecord, owned: &OwnedSet, team: &TeamSelection) -> Row {
    let team_badge = team
        .members()
        .find(|(_, member)| *member == unit.name)
        .map_or_else(|| PLACEHOLDER.to_string(), |(category, _)| category.to_string());

    let mut cells = vec![
        if owned.is_owned(&unit.name) { "[x]" } else { "[ ]" }.to_string(),
        unit.name.clone(),
        unit.variant.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
        tags(&unit.innate_distance, false),
        tags(&unit.innate_style, true),
        trials_badge(unit),
        score_badge(unit.parent.as_ref().and_then(|r| r.score.as_deref())),
        debuff_badge(unit),
    ];
    cells.extend(Level::ALL.iter().map(|&level| awakening_badge(unit.level(level))));
    cells.push(team_badge);
    Row { cells }
}

/// A fully laid-out table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build the table for a view of units.
    #[must_use]
    pub fn build(
        units: &[&UnitRecord],
        owned: &OwnedSet,
        team: &TeamSelection,
        sort: SortState,
    ) -> Self {
        let headers = COLUMNS
            .iter()
            .map(|(label, key)| match (key, sort.key) {
                (Some(key), Some(active)) if *key == active => match sort.order {
                    SortOrder::Ascending => format!("{label} ^"),
                    SortOrder::Descending => format!("{label} v"),
                },
                _ => (*label).to_string(),
            })
            .collect();
        let rows = units.iter().map(|unit| project_row(unit, owned, team)).collect();
        Self { headers, rows }
    }

    /// Rendered rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(&row.cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_line(f, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        write_line(f, &rule, &widths)?;
        for row in &self.rows {
            write_line(f, &row.cells, &widths)?;
        }
        writeln!(f, "{} unit(s)", self.rows.len())
    }
}

/// Render the team planner: one line per category with slots and style
/// counts.
///
/// ```text
/// Sprint (2/3): Alpha, Bravo [Summer]  FR:1 PC:1
/// Mile   (0/3): -
/// ```
#[must_use]
pub fn render_team(team: &TeamSelection, dataset: &Dataset) -> String {
    let label_width = Category::ALL.iter().map(|c| c.as_str().len()).max().unwrap_or(0);
    let mut out = String::new();
    for category in Category::ALL {
        let slots = team.slots(category);
        let members = if slots.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            slots
                .iter()
                .enumerate()
                .map(|(idx, name)| format!("{idx}:{name}"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let summary = style_summary(team, category, dataset)
            .counts()
            .iter()
            .map(|(abbr, count)| format!("{abbr}:{count}"))
            .collect::<Vec<_>>()
            .join(" ");
        let line = format!(
            "{:<label_width$} ({}/{MAX_SLOTS}): {members}  {summary}",
            category.as_str(),
            slots.len()
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{Debuffer, Review};

    #[test]
    fn test_score_badge() {
        assert_eq!(score_badge(Some("4")), "4");
        assert_eq!(score_badge(Some("5?")), "5?");
        assert_eq!(score_badge(Some("4 / 3")), "4");
        assert_eq!(score_badge(Some("n/a")), PLACEHOLDER);
        assert_eq!(score_badge(Some("  ")), PLACEHOLDER);
        assert_eq!(score_badge(None), PLACEHOLDER);
    }

    #[test]
    fn test_awakening_badge_variants() {
        let plain = AwakeningRating {
            score: Some("4".to_string()),
            ..AwakeningRating::default()
        };
        assert_eq!(awakening_badge(Some(&plain)), "4");

        let tracked = AwakeningRating {
            score: Some("4".to_string()),
            track_type: Some("Mile".to_string()),
            ..AwakeningRating::default()
        };
        assert_eq!(awakening_badge(Some(&tracked)), "4 (Mile)");

        let special = AwakeningRating {
            score: Some("2".to_string()),
            special_score: Some("5".to_string()),
            special_style: Some("Pace Chaser".to_string()),
            ..AwakeningRating::default()
        };
        assert_eq!(awakening_badge(Some(&special)), "2 (5 PC)");
        assert_eq!(awakening_badge(None), PLACEHOLDER);
    }

    #[test]
    fn test_project_row_degrades_to_placeholders() {
        let unit = UnitRecord::new("Bare");
        let row = project_row(&unit, &OwnedSet::new(), &TeamSelection::new());
        assert_eq!(row.cells.len(), COLUMNS.len());
        assert_eq!(row.cells[0], "[ ]");
        assert_eq!(row.cells[1], "Bare");
        assert!(row.cells[2..].iter().all(|c| c == PLACEHOLDER));
    }

    #[test]
    fn test_project_row_full() {
        let mut unit = UnitRecord::new("A");
        unit.innate_style = vec!["Late Surger".to_string()];
        unit.trials = Some(Review {
            score: Some("4".to_string()),
            style: Some("Late/End".to_string()),
            ..Review::default()
        });
        unit.debuffer = Some(Debuffer {
            kind: Some("Speed Debuffer".to_string()),
            effect: Some("-0.25".to_string()),
            note: None,
        });
        let mut owned = OwnedSet::new();
        owned.set("A", true);
        let mut team = TeamSelection::new();
        team.add("A", Category::Long).unwrap();

        let row = project_row(&unit, &owned, &team);
        assert_eq!(row.cells[0], "[x]");
        assert_eq!(row.cells[4], "LS");
        assert_eq!(row.cells[5], "4 LS/EC");
        assert_eq!(row.cells[7], "Speed Debuffer -0.25");
        assert_eq!(row.cells[12], "Long");
    }

    #[test]
    fn test_table_marks_sorted_header() {
        let units = [UnitRecord::new("A")];
        let view: Vec<&UnitRecord> = units.iter().collect();
        let sort = SortState {
            key: Some(SortKey::Name),
            order: SortOrder::Descending,
        };
        let text = Table::build(&view, &OwnedSet::new(), &TeamSelection::new(), sort).to_string();
        assert!(text.lines().next().unwrap().contains("Name v"));
        assert!(text.ends_with("1 unit(s)\n"));
    }

    #[test]
    fn test_render_team_lines() {
        let dataset = Dataset::new(vec![UnitRecord::new("A")]);
        let mut team = TeamSelection::new();
        team.add("A", Category::Mile).unwrap();

        let text = render_team(&team, &dataset);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Sprint (0/3): -");
        assert_eq!(lines[1], "Mile   (1/3): 0:A  un:1");
    }
}
