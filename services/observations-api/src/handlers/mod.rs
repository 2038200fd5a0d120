//! HTTP request handlers for the observations API.

pub mod health;
pub mod observations;
pub mod taxa;
pub mod viewport;
