//! # uma-planner: Unit Ratings Browser and Team Planner
//!
//! Loads a static dataset of unit ratings, lets the user filter and sort it,
//! track which units they own, and plan a team of up to three units in each
//! of five race categories. Owned flags and the team persist in a key-value
//! store and can be exported to or imported from a JSON document.
//!
//! ## Layout
//!
//! - [`unit`]: the unit record, score parsing and tag vocabulary
//! - [`dataset`]: one-shot dataset load
//! - [`query`]: filter and sort engine
//! - [`state`]: owned set, team selection and their persistence
//! - [`kv`]: key-value backends
//! - [`render`] and [`planner`]: table rows, badges and team summaries
//! - [`ui`]: dropdown and tooltip state
//! - [`app`]: the session controller and its event dispatch table
//!
//! ## Example
//!
//! ```rust
//! use uma_planner::kv::MemoryKvStore;
//! use uma_planner::state::{Category, PersistentStore};
//! use uma_planner::{App, Dataset};
//!
//! let dataset = Dataset::from_json(
//!     r#"[{"name": "Alpha", "innate_distance": ["Sprint"], "trials": {"score": "4"}}]"#,
//! )?;
//! let mut app = App::new(dataset, PersistentStore::new(MemoryKvStore::new()))?;
//!
//! app.dispatch_id("filter-distance", "Sprint")?;
//! app.add_to_team("Alpha", Category::Sprint)?;
//! assert_eq!(app.view_names(), vec!["Alpha"]);
//! # Ok::<(), uma_planner::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod app;
pub mod audit;
pub mod config;
pub mod dataset;
pub mod error;
pub mod kv;
pub mod planner;
pub mod query;
pub mod render;
pub mod state;
pub mod ui;
pub mod unit;

pub use app::App;
pub use config::Config;
pub use dataset::Dataset;
pub use error::{Error, Result};
