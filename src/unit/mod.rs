//! Unit data model
//!
//! ## Schema Overview
//!
//! ```text
//! UnitRecord
//!   ├── innate_distance / innate_style   [tag sets]
//!   ├──< StyleReview (N)
//!   ├── trials / parent                  Review
//!   ├── debuffer                         Debuffer
//!   └── lv2..lv5                         AwakeningRating
//! ```
//!
//! Score fields keep their raw text; [`score`] turns them into integers for
//! badges, filters and sorting. [`vocab`] holds the canonical distance and
//! style spellings.

mod record;
pub mod score;
pub mod vocab;

pub use record::{
    base_name, AwakeningRating, Debuffer, Level, Review, StyleReview, UnitRecord,
};
