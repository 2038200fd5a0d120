//! Observations API Service Library
//!
//! HTTP surface over the sync engine: map markers for a viewport, the
//! initial viewport around the user, and per-taxon details.

pub mod config;
pub mod error;
pub mod geolocation;
pub mod handlers;
pub mod markers;
pub mod routes;
pub mod state;
pub mod viewport;
