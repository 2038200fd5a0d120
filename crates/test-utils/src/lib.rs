//! Fixtures, record generators and a scripted HTTP upstream for the
//! workspace's tests.
//!
//! ```ignore
//! use test_utils::{fixtures, occurrences, MockUpstream};
//! ```

pub mod fixtures;
pub mod generators;
pub mod mock_upstream;

pub use generators::*;
pub use mock_upstream::{MockResponse, MockUpstream, RecordedRequest};
