//! Dataset audit
//!
//! Data-quality checks over the loaded dataset: duplicate names, missing
//! awakening scores, uncertain or non-standard score text, and tag
//! spellings outside the canonical vocabulary.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::unit::score::{classify, ScoreShape};
use crate::unit::vocab::{alias_for, is_distance, is_style, SPECIAL_STYLES};
use crate::unit::{Level, UnitRecord};
use crate::Dataset;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Data is wrong (duplicate keys)
    Error,
    /// Data is usable but suspect
    Warning,
    /// Worth knowing, nothing to fix
    Info,
}

impl Severity {
    const fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

/// One audit finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Severity
    pub severity: Severity,
    /// Unit the finding is about
    pub unit: String,
    /// Human-readable description
    pub message: String,
}

/// All findings of one audit run.
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    findings: Vec<Finding>,
    units: usize,
}

impl AuditReport {
    fn push(&mut self, severity: Severity, unit: &str, message: impl Into<String>) {
        self.findings.push(Finding {
            severity,
            unit: unit.to_string(),
            message: message.into(),
        });
    }

    /// All findings in discovery order.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings of one severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    /// Number of findings of one severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    /// No error-level findings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.count(Severity::Error) == 0
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Audited {} unit(s)", self.units)?;
        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            let count = self.count(severity);
            if count == 0 {
                continue;
            }
            writeln!(f, "\n{} ({count})", severity.label())?;
            for finding in self.with_severity(severity) {
                writeln!(f, "  {}: {}", finding.unit, finding.message)?;
            }
        }
        write!(
            f,
            "\n{} error(s), {} warning(s), {} info",
            self.count(Severity::Error),
            self.count(Severity::Warning),
            self.count(Severity::Info)
        )
    }
}

fn check_score(report: &mut AuditReport, unit: &str, field: &str, raw: &str) {
    match classify(raw) {
        ScoreShape::Standard => {}
        ScoreShape::Uncertain => {
            report.push(Severity::Warning, unit, format!("uncertain score '{raw}' in {field}"));
        }
        ScoreShape::Annotated => {
            report.push(Severity::Warning, unit, format!("annotated score '{raw}' in {field}"));
        }
        ScoreShape::Compound => {
            report.push(Severity::Info, unit, format!("compound score '{raw}' in {field}"));
        }
        ScoreShape::NonStandard => {
            report.push(Severity::Warning, unit, format!("non-standard score '{raw}' in {field}"));
        }
    }
}

fn check_distance(report: &mut AuditReport, unit: &str, tag: &str) {
    for part in tag.split('/').map(str::trim).filter(|p| !p.is_empty()) {
        if is_distance(part) {
            continue;
        }
        match alias_for(part) {
            Some(canonical) => report.push(
                Severity::Warning,
                unit,
                format!("non-standard distance '{part}' should be '{canonical}'"),
            ),
            None => report.push(Severity::Warning, unit, format!("unknown distance '{part}'")),
        }
    }
}

fn check_style(report: &mut AuditReport, unit: &str, tag: &str) {
    if SPECIAL_STYLES.contains(&tag) {
        return;
    }
    for part in tag.split('/').map(str::trim).filter(|p| !p.is_empty()) {
        if is_style(part) {
            continue;
        }
        match alias_for(part) {
            Some(canonical) => report.push(
                Severity::Warning,
                unit,
                format!("non-standard style '{part}' should be '{canonical}'"),
            ),
            None => report.push(Severity::Info, unit, format!("non-standard style '{part}'")),
        }
    }
}

fn audit_unit(report: &mut AuditReport, unit: &UnitRecord) {
    let name = unit.name.as_str();

    let mut any_awakening = false;
    for level in Level::ALL {
        if let Some(raw) = unit.level(level).and_then(|r| r.score.as_deref()) {
            any_awakening = true;
            check_score(report, name, level.as_str(), raw);
        }
    }
    if !any_awakening {
        report.push(Severity::Warning, name, "all awakening scores (lv2-lv5) are missing");
    }

    if unit.innate_distance.is_empty() {
        report.push(Severity::Info, name, "empty innate_distance");
    }
    for tag in &unit.innate_distance {
        check_distance(report, name, tag);
    }
    if unit.innate_style.is_empty() {
        report.push(Severity::Info, name, "empty innate_style");
    }
    for tag in &unit.innate_style {
        check_style(report, name, tag);
    }

    for (field, review) in [("trials", &unit.trials), ("parent", &unit.parent)] {
        let Some(review) = review else { continue };
        match review.score.as_deref() {
            Some(raw) => check_score(report, name, field, raw),
            None => report.push(Severity::Info, name, format!("missing {field} score")),
        }
        if let Some(style) = review.style.as_deref() {
            check_style(report, name, style);
        }
        if let Some(distance) = review.distance.as_deref() {
            check_distance(report, name, distance);
        }
    }

    if unit.description.as_deref().map_or(true, |d| d.trim().is_empty()) {
        report.push(Severity::Info, name, "missing description");
    }

    for review in &unit.style_reviews {
        if let Some(style) = review.style.as_deref() {
            check_style(report, name, style);
        }
        if let Some(raw) = review.score.as_deref() {
            check_score(report, name, "style_review", raw);
        }
    }
}

/// Run every check over the dataset.
#[must_use]
pub fn audit(dataset: &Dataset) -> AuditReport {
    let mut report = AuditReport {
        units: dataset.len(),
        ..AuditReport::default()
    };
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for unit in dataset.units() {
        if !seen.insert(unit.name.as_str()) {
            report.push(Severity::Error, &unit.name, "duplicate entry");
        }
        audit_unit(&mut report, unit);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(report: &AuditReport, severity: Severity) -> Vec<String> {
        report
            .with_severity(severity)
            .map(|f| format!("{}: {}", f.unit, f.message))
            .collect()
    }

    #[test]
    fn test_duplicate_is_error() {
        let dataset = Dataset::new(vec![UnitRecord::new("A"), UnitRecord::new("A")]);
        let report = audit(&dataset);
        assert!(!report.is_clean());
        assert_eq!(messages(&report, Severity::Error), vec!["A: duplicate entry"]);
    }

    #[test]
    fn test_score_and_tag_findings() {
        let dataset = Dataset::from_json(
            r#"[{
                "name": "A",
                "description": "ok",
                "innate_distance": ["Med.", "Turf"],
                "innate_style": ["Late", "Not-Front"],
                "lv2": {"score": "5?"},
                "lv3": {"score": "4 / 3"},
                "trials": {"score": "4 but bad"},
                "parent": {"score": null}
            }]"#,
        )
        .unwrap();
        let report = audit(&dataset);

        let warnings = messages(&report, Severity::Warning);
        assert!(warnings.contains(&"A: uncertain score '5?' in lv2".to_string()));
        assert!(warnings.contains(&"A: non-standard distance 'Med.' should be 'Medium'".to_string()));
        assert!(warnings.contains(&"A: unknown distance 'Turf'".to_string()));
        assert!(warnings.contains(&"A: non-standard style 'Late' should be 'Late Surger'".to_string()));
        assert!(warnings.contains(&"A: annotated score '4 but bad' in trials".to_string()));

        let infos = messages(&report, Severity::Info);
        assert!(infos.contains(&"A: compound score '4 / 3' in lv3".to_string()));
        assert!(infos.contains(&"A: missing parent score".to_string()));
        assert!(report.is_clean());
    }

    #[test]
    fn test_bare_unit_findings() {
        let dataset = Dataset::new(vec![UnitRecord::new("Bare")]);
        let report = audit(&dataset);
        assert_eq!(report.count(Severity::Warning), 1);
        assert_eq!(report.count(Severity::Info), 3);
        assert!(report.to_string().starts_with("Audited 1 unit(s)"));
    }
}
