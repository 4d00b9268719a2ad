//! Tooltip and dropdown controller
//!
//! Pure presentation state: which filter dropdown is open and which unit's
//! tooltip is showing. Nothing here touches filters, sorting or the team.

use std::fmt::Write;
use std::str::FromStr;

use crate::unit::UnitRecord;
use crate::{Error, Result};

/// Multi-select filter dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    /// Distance tags
    Distance,
    /// Style tags
    Style,
    /// Team trials scores
    Trials,
    /// Parent scores
    Parent,
}

impl FromStr for Dropdown {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "style" => Ok(Self::Style),
            "trials" => Ok(Self::Trials),
            "parent" => Ok(Self::Parent),
            other => Err(Error::InvalidInput(format!("no dropdown named '{other}'"))),
        }
    }
}

/// Open dropdown and tooltip state.
///
/// At most one dropdown is open. A pinned tooltip stays until it is closed
/// or another unit is pinned; hovering only shows a tooltip while nothing
/// is pinned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    open_dropdown: Option<Dropdown>,
    hovered: Option<String>,
    pinned: Option<String>,
}

impl UiState {
    /// Create a state with everything closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently open dropdown.
    #[must_use]
    pub const fn open_dropdown(&self) -> Option<Dropdown> {
        self.open_dropdown
    }

    /// Open `dropdown`, or close it if it is already open.
    pub fn toggle_dropdown(&mut self, dropdown: Dropdown) {
        self.open_dropdown = if self.open_dropdown == Some(dropdown) {
            None
        } else {
            Some(dropdown)
        };
    }

    /// Close any open dropdown (click outside).
    pub fn close_dropdowns(&mut self) {
        self.open_dropdown = None;
    }

    /// Pointer entered a unit's info badge; `None` when it left.
    pub fn hover(&mut self, name: Option<&str>) {
        self.hovered = name.map(str::to_string);
    }

    /// Pin the tooltip of `name`; pinning the pinned unit again unpins it.
    pub fn pin(&mut self, name: &str) {
        if self.pinned.as_deref() == Some(name) {
            self.pinned = None;
        } else {
            self.pinned = Some(name.to_string());
        }
    }

    /// Close the tooltip, pinned or hovered.
    pub fn close_tooltip(&mut self) {
        self.pinned = None;
        self.hovered = None;
    }

    /// Unit whose tooltip is visible.
    #[must_use]
    pub fn active_tooltip(&self) -> Option<&str> {
        self.pinned.as_deref().or(self.hovered.as_deref())
    }
}

/// Tooltip body for a unit: description, reviewer notes and style reviews.
#[must_use]
pub fn tooltip_text(unit: &UnitRecord) -> String {
    let mut out = unit.labelled_name();
    out.push('\n');

    if let Some(description) = unit.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "{}", description.trim());
    }

    let notes = [
        ("Trials", unit.trials.as_ref().and_then(|r| r.note.as_deref())),
        ("Parent", unit.parent.as_ref().and_then(|r| r.note.as_deref())),
        ("Debuff", unit.debuffer.as_ref().and_then(|d| d.note.as_deref())),
    ];
    for (label, note) in notes {
        if let Some(note) = note.filter(|n| !n.trim().is_empty()) {
            let _ = writeln!(out, "{label}: {}", note.trim());
        }
    }

    if let Some(trials) = &unit.trials {
        if let Some(distance) = trials.distance.as_deref() {
            let _ = writeln!(out, "Trials distance: {distance}");
        }
    }

    for review in &unit.style_reviews {
        let style = review.style.as_deref().unwrap_or("?");
        let score = review.score.as_deref().unwrap_or("-");
        match review.distance.as_deref() {
            Some(distance) => {
                let _ = writeln!(out, "  {style} {score} ({distance})");
            }
            None => {
                let _ = writeln!(out, "  {style} {score}");
            }
        }
    }
    out
}
