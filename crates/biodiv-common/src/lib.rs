//! Common types and utilities shared across the nearby-biodiversity crates.

pub mod bbox;
pub mod cell;
pub mod error;
pub mod record;
pub mod time;

pub use bbox::BoundingBox;
pub use cell::{CellCacheEntry, CellId};
pub use error::{BiodivError, BiodivResult};
pub use record::{Kingdom, OccurrenceRecord};
pub use time::{Clock, DateRange, FixedClock, SystemClock};
