//! Score text helpers
//!
//! Scores arrive as free text (`"4"`, `"5?"`, `"2~3"`, `"1? 3?"`,
//! `"4 / 3"`, `"4 but bad"`). Badges, filters and sorts all work on the
//! first digit of that text.

/// Extract the integer score from raw score text.
///
/// Takes the first ASCII digit, so uncertain (`"5?"`), ranged (`"2~3"`) and
/// ambiguous (`"1? 3?"`) scores resolve to their leading value.
///
/// # Example
/// ```
/// use uma_planner::unit::score::score_value;
///
/// assert_eq!(score_value(Some("1? 3?")), Some(1));
/// assert_eq!(score_value(Some("2~3")), Some(2));
/// assert_eq!(score_value(Some("n/a")), None);
/// assert_eq!(score_value(None), None);
/// ```
#[must_use]
pub fn score_value(raw: Option<&str>) -> Option<u8> {
    raw?.chars()
        .find(char::is_ascii_digit)
        .and_then(|c| c.to_digit(10))
        .and_then(|d| u8::try_from(d).ok())
}

/// Score used for ordering: missing or unparseable text sorts as 0.
#[must_use]
pub fn sort_score(raw: Option<&str>) -> u8 {
    score_value(raw).unwrap_or(0)
}

/// Whether the text is a plain integer score in 1..=5.
#[must_use]
pub fn is_valid_score(raw: &str) -> bool {
    raw.trim()
        .parse::<u8>()
        .is_ok_and(|v| (1..=5).contains(&v))
}

/// How a piece of score text is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreShape {
    /// Plain integer 1..=5
    Standard,
    /// Contains an uncertainty marker (`?`, `~` or `+`)
    Uncertain,
    /// Carries a written annotation ("4 but bad")
    Annotated,
    /// Several scores joined with `/`
    Compound,
    /// Anything else
    NonStandard,
}

/// Characters that mark a score as uncertain.
pub const UNCERTAIN_MARKERS: [char; 3] = ['?', '~', '+'];

/// Classify raw score text.
#[must_use]
pub fn classify(raw: &str) -> ScoreShape {
    let text = raw.trim();
    if text.contains(UNCERTAIN_MARKERS) {
        ScoreShape::Uncertain
    } else if text.to_lowercase().contains("but") {
        ScoreShape::Annotated
    } else if is_valid_score(text) {
        ScoreShape::Standard
    } else if text.contains('/') {
        ScoreShape::Compound
    } else {
        ScoreShape::NonStandard
    }
}
