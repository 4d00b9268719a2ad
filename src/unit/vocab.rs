//! Canonical distance and style vocabulary
//!
//! Ratings sources spell the same tag several ways (`Med.`, `Mid`, `Late`,
//! `Runaway`). Filter input and audits go through [`standardize`] so that
//! every comparison happens on the canonical spelling.

/// Canonical distance tags, in category order.
pub const DISTANCES: [&str; 5] = ["Sprint", "Mile", "Medium", "Long", "Dirt"];

/// Canonical running styles.
pub const STYLES: [&str; 4] = ["Front Runner", "Pace Chaser", "Late Surger", "End Closer"];

/// Style values that are not canonical but are meaningful as written.
pub const SPECIAL_STYLES: [&str; 2] = ["Not-Front", "Anything"];

/// Alias -> canonical spelling.
const ALIASES: [(&str, &str); 9] = [
    ("Med.", "Medium"),
    ("Med", "Medium"),
    ("Mid", "Medium"),
    ("Front", "Front Runner"),
    ("Fronts", "Front Runner"),
    ("Runaway", "Front Runner"),
    ("Pace", "Pace Chaser"),
    ("Late", "Late Surger"),
    ("End", "End Closer"),
];

/// Whether `tag` is one of the five canonical distances.
#[must_use]
pub fn is_distance(tag: &str) -> bool {
    DISTANCES.contains(&tag)
}

/// Whether `tag` is one of the four canonical styles.
#[must_use]
pub fn is_style(tag: &str) -> bool {
    STYLES.contains(&tag)
}

/// Canonical spelling for a known alias, if `word` is one.
#[must_use]
pub fn alias_for(word: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(word))
        .map(|(_, canonical)| *canonical)
}

fn standardize_word(word: &str) -> String {
    if let Some(canonical) = alias_for(word) {
        return canonical.to_string();
    }
    DISTANCES
        .iter()
        .chain(STYLES.iter())
        .find(|known| known.eq_ignore_ascii_case(word))
        .map_or_else(|| word.to_string(), |known| (*known).to_string())
}

/// Standardize a distance or style value to its canonical form.
///
/// Slash-separated compounds are standardized per component and
/// de-duplicated in order (`"late/End"` -> `"Late Surger/End Closer"`).
/// Unknown words are kept as written. Returns `None` for blank input.
///
/// # Example
/// ```
/// use uma_planner::unit::vocab::standardize;
///
/// assert_eq!(standardize("Med.").as_deref(), Some("Medium"));
/// assert_eq!(standardize("pace").as_deref(), Some("Pace Chaser"));
/// assert_eq!(standardize("  "), None);
/// ```
#[must_use]
pub fn standardize(text: &str) -> Option<String> {
    let mut words: Vec<String> = Vec::new();
    for word in text.split('/').map(str::trim).filter(|w| !w.is_empty()) {
        let canonical = standardize_word(word);
        if !words.contains(&canonical) {
            words.push(canonical);
        }
    }
    if words.is_empty() {
        None
    } else {
        Some(words.join("/"))
    }
}

/// Short badge label for a running style.
///
/// The four canonical styles have fixed abbreviations; anything else is
/// shortened to its first two characters.
#[must_use]
pub fn style_abbreviation(style: &str) -> String {
    match style {
        "Front Runner" => "FR".to_string(),
        "Pace Chaser" => "PC".to_string(),
        "Late Surger" => "LS".to_string(),
        "End Closer" => "EC".to_string(),
        other => other.chars().take(2).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize_aliases() {
        assert_eq!(standardize("Mid").as_deref(), Some("Medium"));
        assert_eq!(standardize("Runaway").as_deref(), Some("Front Runner"));
        assert_eq!(standardize("END").as_deref(), Some("End Closer"));
    }

    #[test]
    fn test_standardize_canonical_case_insensitive() {
        assert_eq!(standardize("sprint").as_deref(), Some("Sprint"));
        assert_eq!(standardize("late surger").as_deref(), Some("Late Surger"));
    }

    #[test]
    fn test_standardize_compound_dedupes() {
        assert_eq!(
            standardize("Late/End/Late Surger").as_deref(),
            Some("Late Surger/End Closer")
        );
    }

    #[test]
    fn test_standardize_keeps_unknown() {
        assert_eq!(standardize("Not-Front").as_deref(), Some("Not-Front"));
        assert_eq!(standardize("/ /"), None);
    }

    #[test]
    fn test_style_abbreviation() {
        assert_eq!(style_abbreviation("Front Runner"), "FR");
        assert_eq!(style_abbreviation("Pace Chaser"), "PC");
        assert_eq!(style_abbreviation("Late Surger"), "LS");
        assert_eq!(style_abbreviation("End Closer"), "EC");
        assert_eq!(style_abbreviation("unknown"), "un");
        assert_eq!(style_abbreviation("A"), "A");
    }

    #[test]
    fn test_membership() {
        assert!(is_distance("Dirt"));
        assert!(!is_distance("Med."));
        assert!(is_style("End Closer"));
        assert!(!is_style("End"));
    }
}
