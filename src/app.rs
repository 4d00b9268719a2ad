//! Application controller
//!
//! [`App`] owns every piece of session state: the dataset, the persisted
//! owned set and team, the active filter criteria, the sort state and the
//! UI state. Rendering and querying borrow it; mutations go through its
//! methods, which persist immediately.
//!
//! UI events reach the controller through a dispatch table keyed by control
//! id ([`ControlId`]), so business logic never depends on how an event was
//! produced.
//!
//! ## View composition
//!
//! The visible view is always `filter(sort(dataset))`. Sorting keeps the
//! active filters and filtering keeps the active sort.

use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::kv::KvStore;
use crate::query::{
    apply_filters, parse_scores, parse_tags, sort_units, FilterCriteria, SortKey, SortOrder,
    SortState, TriState,
};
use crate::render::{render_team, Table};
use crate::state::{Category, ExportBundle, OwnedSet, PersistentStore, TeamSelection};
use crate::ui::{tooltip_text, Dropdown, UiState};
use crate::unit::UnitRecord;
use crate::{Dataset, Error, Result};

/// Controls that can raise UI events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// Search box; value is the search text
    Search,
    /// Distance dropdown; value is a comma-separated tag list
    FilterDistance,
    /// Style dropdown; value is a comma-separated tag list
    FilterStyle,
    /// Trials score dropdown; value is a comma-separated score list
    FilterTrials,
    /// Parent score dropdown; value is a comma-separated score list
    FilterParent,
    /// Debuff select; value is any / yes / no
    FilterDebuff,
    /// Owned select; value is any / yes / no
    FilterOwned,
    /// In-team select; value is any / yes / no
    FilterTeam,
    /// Clear-filters button
    ClearFilters,
    /// Column header; value is the column id
    Sort,
    /// Owned checkbox; value is the unit name
    ToggleOwned,
    /// Add-to-team action; value is `<category> <unit name>`
    TeamAdd,
    /// Remove-from-team action; value is `<category> <slot index>`
    TeamRemove,
    /// Dropdown button; value is the dropdown name, blank closes all
    Dropdown,
    /// Info badge hover; value is the unit name, blank when leaving
    TooltipHover,
    /// Info badge click; value is the unit name
    TooltipPin,
    /// Tooltip close button
    TooltipClose,
}

/// Control id -> control, as wired to the UI surface.
pub const CONTROL_TABLE: [(&str, ControlId); 17] = [
    ("search", ControlId::Search),
    ("filter-distance", ControlId::FilterDistance),
    ("filter-style", ControlId::FilterStyle),
    ("filter-trials", ControlId::FilterTrials),
    ("filter-parent", ControlId::FilterParent),
    ("filter-debuff", ControlId::FilterDebuff),
    ("filter-owned", ControlId::FilterOwned),
    ("filter-team", ControlId::FilterTeam),
    ("clear-filters", ControlId::ClearFilters),
    ("sort", ControlId::Sort),
    ("toggle-owned", ControlId::ToggleOwned),
    ("team-add", ControlId::TeamAdd),
    ("team-remove", ControlId::TeamRemove),
    ("dropdown", ControlId::Dropdown),
    ("tooltip-hover", ControlId::TooltipHover),
    ("tooltip-pin", ControlId::TooltipPin),
    ("tooltip-close", ControlId::TooltipClose),
];

impl ControlId {
    /// Control id string.
    #[must_use]
    pub fn id(self) -> &'static str {
        CONTROL_TABLE
            .iter()
            .find(|(_, control)| *control == self)
            .map_or("", |(id, _)| id)
    }
}

impl FromStr for ControlId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CONTROL_TABLE
            .iter()
            .find(|(id, _)| *id == s)
            .map(|(_, control)| *control)
            .ok_or_else(|| Error::UnknownControl(s.to_string()))
    }
}

/// Split `"<category> <rest>"`.
fn category_and_rest(value: &str) -> Result<(Category, &str)> {
    let (category, rest) = value.trim().split_once(char::is_whitespace).ok_or_else(|| {
        Error::InvalidInput(format!("expected '<category> <value>', got '{value}'"))
    })?;
    Ok((category.parse()?, rest.trim()))
}

/// Session controller.
#[derive(Debug)]
pub struct App<S: KvStore> {
    dataset: Dataset,
    store: PersistentStore<S>,
    owned: OwnedSet,
    team: TeamSelection,
    criteria: FilterCriteria,
    sort: SortState,
    ui: UiState,
}

impl<S: KvStore> App<S> {
    /// Start a session: load the persisted owned set and team.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    pub fn new(dataset: Dataset, store: PersistentStore<S>) -> Result<Self> {
        let owned = store.load_owned()?;
        let team = store.load_team()?;
        info!(
            units = dataset.len(),
            owned = owned.owned_count(),
            team = team.len(),
            "session started"
        );
        Ok(Self {
            dataset,
            store,
            owned,
            team,
            criteria: FilterCriteria::default(),
            sort: SortState::default(),
            ui: UiState::default(),
        })
    }

    /// Loaded dataset.
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Owned set.
    #[must_use]
    pub const fn owned(&self) -> &OwnedSet {
        &self.owned
    }

    /// Team selection.
    #[must_use]
    pub const fn team(&self) -> &TeamSelection {
        &self.team
    }

    /// Active filter criteria.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Active sort state.
    #[must_use]
    pub const fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Tooltip/dropdown state.
    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Persistent store (for inspection/testing).
    #[must_use]
    pub const fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    fn unit(&self, name: &str) -> Result<&UnitRecord> {
        self.dataset
            .get(name)
            .ok_or_else(|| Error::UnitNotFound(name.to_string()))
    }

    // ------------------------------------------------------------------
    // Query
    // ------------------------------------------------------------------

    /// Sorted copy of the full dataset; filters are not applied.
    #[must_use]
    pub fn sort_data(&self, key: SortKey, order: SortOrder) -> Vec<&UnitRecord> {
        sort_units(self.dataset.units(), key, order, &self.owned)
    }

    /// Visible units: the dataset, sorted by the active column, then
    /// filtered by the active criteria.
    #[must_use]
    pub fn view(&self) -> Vec<&UnitRecord> {
        match self.sort.key {
            Some(key) => apply_filters(
                self.sort_data(key, self.sort.order),
                &self.criteria,
                &self.owned,
                &self.team,
            ),
            None => apply_filters(self.dataset.units(), &self.criteria, &self.owned, &self.team),
        }
    }

    /// Names of the visible units, in view order.
    #[must_use]
    pub fn view_names(&self) -> Vec<&str> {
        self.view().into_iter().map(|u| u.name.as_str()).collect()
    }

    /// Render the whole table for the current view.
    #[must_use]
    pub fn render(&self) -> String {
        Table::build(&self.view(), &self.owned, &self.team, self.sort).to_string()
    }

    /// Render the team planner.
    #[must_use]
    pub fn render_team(&self) -> String {
        render_team(&self.team, &self.dataset)
    }

    /// Tooltip body of the active tooltip, if one is showing.
    #[must_use]
    pub fn render_tooltip(&self) -> Option<String> {
        self.ui
            .active_tooltip()
            .and_then(|name| self.dataset.get(name))
            .map(tooltip_text)
    }

    // ------------------------------------------------------------------
    // Filters and sorting
    // ------------------------------------------------------------------

    /// Set the search text.
    pub fn set_search(&mut self, text: &str) {
        self.criteria.search = text.to_string();
    }

    /// Replace the filter criteria wholesale.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Reset every filter (search, dropdowns and selects).
    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        debug!("filters cleared");
    }

    /// Header click on `key`.
    pub fn sort_by(&mut self, key: SortKey) {
        self.sort.toggle(key);
        debug!(key = %key, order = ?self.sort.order, "sort changed");
    }

    // ------------------------------------------------------------------
    // Owned set and team
    // ------------------------------------------------------------------

    /// Flip the owned flag of a unit and persist. Returns the new flag.
    ///
    /// # Errors
    /// Returns [`Error::UnitNotFound`] for names outside the dataset, or a
    /// storage error if persisting fails. The owned set is unchanged on error.
    pub fn toggle_owned(&mut self, name: &str) -> Result<bool> {
        self.unit(name)?;
        let mut next = self.owned.clone();
        let owned = next.toggle(name);
        self.store.save_owned(&next)?;
        self.owned = next;
        debug!(name, owned, "owned toggled");
        Ok(owned)
    }

    /// Add a unit to a team category and persist.
    ///
    /// # Errors
    /// - [`Error::UnitNotFound`] for names outside the dataset
    /// - [`Error::DuplicateBaseName`] if the base character is on the team
    /// - [`Error::CategoryFull`] if the category has three members
    /// - a storage error if persisting fails
    ///
    /// Nothing changes on error.
    pub fn add_to_team(&mut self, name: &str, category: Category) -> Result<()> {
        self.unit(name)?;
        let mut next = self.team.clone();
        if let Err(e) = next.add(name, category) {
            warn!(name, %category, error = %e, "team add rejected");
            return Err(e);
        }
        self.store.save_team(&next)?;
        self.team = next;
        info!(name, %category, "added to team");
        Ok(())
    }

    /// Remove the member at `index` of `category` and persist.
    ///
    /// # Errors
    /// Returns [`Error::SlotOutOfRange`] if the slot is empty, or a storage
    /// error if persisting fails. The team is unchanged on error.
    pub fn remove_from_team(&mut self, category: Category, index: usize) -> Result<String> {
        let mut next = self.team.clone();
        let removed = next.remove(category, index)?;
        self.store.save_team(&next)?;
        self.team = next;
        info!(name = %removed, %category, "removed from team");
        Ok(removed)
    }

    /// Forget the owned set and team, both in memory and in the store.
    ///
    /// # Errors
    /// Returns a storage error if a delete fails; the in-memory state is kept
    /// in that case.
    pub fn reset_state(&mut self) -> Result<()> {
        self.store.reset()?;
        self.owned = OwnedSet::new();
        self.team = TeamSelection::new();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Export / import
    // ------------------------------------------------------------------

    /// Bundle the persisted owned set and team.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    pub fn export(&self) -> Result<ExportBundle> {
        self.store.export()
    }

    /// Apply an import document and reload state from the store.
    ///
    /// # Errors
    /// Returns [`Error::ImportError`] if the text does not parse or carries an
    /// invalid team; nothing is committed in that case.
    pub fn import_json(&mut self, text: &str) -> Result<()> {
        let bundle = ExportBundle::from_json(text)?;
        self.store.import(&bundle)?;
        self.owned = self.store.load_owned()?;
        self.team = self.store.load_team()?;
        Ok(())
    }

    /// Read an import file and apply it.
    ///
    /// # Errors
    /// Returns [`Error::ImportError`] if the file cannot be read or parsed.
    pub async fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::ImportError(format!("cannot read {}: {e}", path.display())))?;
        self.import_json(&text)
    }

    // ------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------

    /// Dispatch an event by control id string.
    ///
    /// # Errors
    /// Returns [`Error::UnknownControl`] for ids missing from
    /// [`CONTROL_TABLE`], or whatever the handler returns.
    pub fn dispatch_id(&mut self, id: &str, value: &str) -> Result<()> {
        let control: ControlId = id.trim().parse()?;
        self.dispatch(control, value)
    }

    /// Dispatch an event raised by `control` with its input `value`.
    ///
    /// # Errors
    /// Returns an error if the value is invalid for the control or the
    /// underlying operation is rejected.
    pub fn dispatch(&mut self, control: ControlId, value: &str) -> Result<()> {
        debug!(control = control.id(), value, "dispatch");
        match control {
            ControlId::Search => self.set_search(value),
            ControlId::FilterDistance => self.criteria.distances = parse_tags(value),
            ControlId::FilterStyle => self.criteria.styles = parse_tags(value),
            ControlId::FilterTrials => self.criteria.trial_scores = parse_scores(value)?,
            ControlId::FilterParent => self.criteria.parent_scores = parse_scores(value)?,
            ControlId::FilterDebuff => self.criteria.debuff = value.parse::<TriState>()?,
            ControlId::FilterOwned => self.criteria.owned = value.parse::<TriState>()?,
            ControlId::FilterTeam => self.criteria.in_team = value.parse::<TriState>()?,
            ControlId::ClearFilters => self.clear_filters(),
            ControlId::Sort => self.sort_by(value.parse()?),
            ControlId::ToggleOwned => {
                self.toggle_owned(value.trim())?;
            }
            ControlId::TeamAdd => {
                let (category, name) = category_and_rest(value)?;
                self.add_to_team(name, category)?;
            }
            ControlId::TeamRemove => {
                let (category, index) = category_and_rest(value)?;
                let index = index.parse().map_err(|_| {
                    Error::InvalidInput(format!("'{index}' is not a slot index"))
                })?;
                self.remove_from_team(category, index)?;
            }
            ControlId::Dropdown => {
                if value.trim().is_empty() {
                    self.ui.close_dropdowns();
                } else {
                    self.ui.toggle_dropdown(value.parse::<Dropdown>()?);
                }
            }
            ControlId::TooltipHover => {
                let name = value.trim();
                self.ui.hover((!name.is_empty()).then_some(name));
            }
            ControlId::TooltipPin => self.ui.pin(value.trim()),
            ControlId::TooltipClose => self.ui.close_tooltip(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;

    fn app() -> App<MemoryKvStore> {
        let dataset = Dataset::from_json(
            r#"[
                {"name": "Alpha", "innate_distance": ["Sprint"], "trials": {"score": "3"}},
                {"name": "Bravo [Summer]", "innate_distance": ["Mile"], "trials": {"score": "5"}},
                {"name": "Bravo", "innate_distance": ["Long"], "trials": {"score": "4"}}
            ]"#,
        )
        .unwrap();
        App::new(dataset, PersistentStore::new(MemoryKvStore::new())).unwrap()
    }

    #[test]
    fn test_control_table_round_trip() {
        for (id, control) in CONTROL_TABLE {
            assert_eq!(control.id(), id);
            assert_eq!(id.parse::<ControlId>().unwrap(), control);
        }
        assert!(matches!(
            "explode".parse::<ControlId>(),
            Err(Error::UnknownControl(_))
        ));
    }

    #[test]
    fn test_sort_composes_with_filter() {
        let mut app = app();
        app.dispatch_id("filter-distance", "Sprint, Long").unwrap();
        app.dispatch_id("sort", "trials").unwrap();
        assert_eq!(app.view_names(), vec!["Alpha", "Bravo"]);

        app.dispatch_id("sort", "trials").unwrap();
        assert_eq!(app.view_names(), vec!["Bravo", "Alpha"]);

        app.dispatch_id("clear-filters", "").unwrap();
        assert_eq!(app.view_names(), vec!["Bravo [Summer]", "Bravo", "Alpha"]);
    }

    #[test]
    fn test_sort_data_ignores_filters() {
        let mut app = app();
        app.set_search("alpha");
        let sorted: Vec<&str> = app
            .sort_data(SortKey::Name, SortOrder::Ascending)
            .into_iter()
            .map(|u| u.name.as_str())
            .collect();
        assert_eq!(sorted, vec!["Alpha", "Bravo", "Bravo [Summer]"]);
    }

    #[test]
    fn test_team_events_persist() {
        let mut app = app();
        app.dispatch_id("team-add", "Mile Bravo [Summer]").unwrap();
        assert_eq!(app.team().slots(Category::Mile), ["Bravo [Summer]"]);
        assert_eq!(app.store().load_team().unwrap(), *app.team());

        let err = app.dispatch_id("team-add", "Long Bravo").unwrap_err();
        assert!(matches!(err, Error::DuplicateBaseName { .. }));

        app.dispatch_id("team-remove", "Mile 0").unwrap();
        assert!(app.team().is_empty());
        assert!(app.store().load_team().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let mut app = app();
        assert!(matches!(app.toggle_owned("Zulu"), Err(Error::UnitNotFound(_))));
        assert!(matches!(
            app.add_to_team("Zulu", Category::Dirt),
            Err(Error::UnitNotFound(_))
        ));
        assert_eq!(app.owned().owned_count(), 0);
    }

    #[test]
    fn test_ui_events() {
        let mut app = app();
        app.dispatch_id("dropdown", "style").unwrap();
        assert_eq!(app.ui().open_dropdown(), Some(Dropdown::Style));
        app.dispatch_id("dropdown", "").unwrap();
        assert_eq!(app.ui().open_dropdown(), None);

        app.dispatch_id("tooltip-hover", "Alpha").unwrap();
        assert!(app.render_tooltip().unwrap().starts_with("Alpha"));
        app.dispatch_id("tooltip-hover", "").unwrap();
        assert!(app.render_tooltip().is_none());
    }

    #[test]
    fn test_invalid_filter_value_keeps_criteria() {
        let mut app = app();
        app.dispatch_id("filter-trials", "4").unwrap();
        assert!(app.dispatch_id("filter-trials", "9").is_err());
        assert_eq!(app.criteria().trial_scores, vec![4]);
    }

    #[test]
    fn test_reset_state_clears_memory_and_store() {
        let mut app = app();
        app.toggle_owned("Alpha").unwrap();
        app.add_to_team("Bravo", Category::Long).unwrap();

        app.reset_state().unwrap();
        assert_eq!(app.owned(), &OwnedSet::new());
        assert!(app.team().is_empty());
        assert_eq!(app.store().load_team().unwrap(), TeamSelection::new());
    }

    #[test]
    fn test_import_reloads_state() {
        let mut app = app();
        app.import_json(r#"{"ownedUmas": {"Alpha": true}}"#).unwrap();
        assert!(app.owned().is_owned("Alpha"));

        assert!(app.import_json("not json").is_err());
        assert!(app.owned().is_owned("Alpha"));
    }
}
