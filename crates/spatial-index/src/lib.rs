//! Spatial indexing of map viewports into fixed-resolution hexagonal cells.
//!
//! `cover` maps a bounding box to the cells overlapping it and
//! `cell_polygon` maps a cell back to its boundary ring for remote queries.
//! Both are pure functions of their input.

pub mod indexer;
pub mod polygon;

pub use indexer::{viewport_rect, SpatialIndexer, CELL_RESOLUTION};
pub use polygon::CellPolygon;
