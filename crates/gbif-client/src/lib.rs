//! Client for the GBIF occurrence and species APIs.
//!
//! Key features:
//! - Offset pagination that stops on an explicit, testable condition
//! - Exponential backoff retry on transport errors, 429 and 5xx
//! - All-or-nothing searches: a failed page discards the pages before it

pub mod config;
pub mod http;
pub mod occurrence;
pub mod pager;
pub mod species;
pub mod wire;

pub use config::{GbifConfig, RetryPolicy};
pub use http::JsonFetcher;
pub use occurrence::{GbifClient, OccurrenceSearch};
pub use pager::Pager;
pub use species::SpeciesLookup;
