//! Persistent planner state
//!
//! [`OwnedSet`] and [`TeamSelection`] are created empty on first use, loaded
//! through [`PersistentStore`] at startup and saved on every mutation.

mod owned;
mod store;
mod team;

pub use owned::OwnedSet;
pub use store::{ExportBundle, PersistentStore, OWNED_KEY, TEAM_KEY};
pub use team::{Category, TeamSelection, MAX_SLOTS};
