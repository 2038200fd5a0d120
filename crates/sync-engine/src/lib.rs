//! Incremental sync of occurrence records per map cell.
//!
//! - [`CellCacheStore`] keeps one entry per cell and fetches only the date
//!   window since that cell's watermark.
//! - [`SyncOrchestrator`] fans out over the visible cells, isolates
//!   failures per cell and aggregates a deduplicated record set.

pub mod cell_store;
pub mod merge;
pub mod orchestrator;

pub use cell_store::{needs_sync, CellCacheStore, SyncSettings};
pub use merge::{merge_records, union_records};
pub use orchestrator::{RefreshOutcome, SyncOrchestrator, DEFAULT_SYNC_THRESHOLD, MAX_COVER_CELLS};
