//! Viewport to cell cover, cell to boundary polygon.

use std::collections::BTreeSet;

use geo::{coord, Rect};
use h3o::geom::{ContainmentMode, Tiler, TilerBuilder};
use h3o::{CellIndex, LatLng, Resolution};
use tracing::debug;

use biodiv_common::{BiodivError, BiodivResult, BoundingBox, CellId};

use crate::polygon::CellPolygon;

/// Resolution of every cell in the system (~0.74 km² hexagons).
pub const CELL_RESOLUTION: Resolution = Resolution::Eight;

/// Width given to a zero-width or zero-height box so it tiles as an area.
const DEGENERATE_PAD_DEG: f64 = 1e-7;

/// Maps bounding boxes to hexagonal cells and cells back to polygons.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialIndexer;

impl SpatialIndexer {
    pub fn new() -> Self {
        Self
    }

    pub fn resolution(&self) -> Resolution {
        CELL_RESOLUTION
    }

    /// Cells overlapping `bbox` at all, not only cells fully inside it.
    ///
    /// A box lying inside a single cell yields that cell.
    pub fn cover(&self, bbox: &BoundingBox) -> BiodivResult<BTreeSet<CellId>> {
        if bbox.width() == 0.0 && bbox.height() == 0.0 {
            bbox.validate()?;
            return Ok(BTreeSet::from([self.cell_at(bbox.south, bbox.west)?]));
        }

        let covered: BTreeSet<CellId> = self
            .tiler_for(bbox)?
            .into_coverage()
            .map(to_cell_id)
            .collect();

        debug!(
            width = bbox.width(),
            height = bbox.height(),
            cells = covered.len(),
            "Computed viewport cover"
        );

        Ok(covered)
    }

    /// Upper bound on the size of `cover(bbox)`, without enumerating cells.
    pub fn cover_size_hint(&self, bbox: &BoundingBox) -> BiodivResult<usize> {
        if bbox.width() == 0.0 && bbox.height() == 0.0 {
            bbox.validate()?;
            return Ok(1);
        }
        Ok(self.tiler_for(bbox)?.coverage_size_hint())
    }

    /// Boundary ring of a cell, closed, in `(lng, lat)` order.
    pub fn cell_polygon(&self, cell: &CellId) -> BiodivResult<CellPolygon> {
        Ok(boundary_of(self.parse_cell(cell)?))
    }

    /// Cell containing a point.
    pub fn cell_at(&self, lat: f64, lng: f64) -> BiodivResult<CellId> {
        Ok(to_cell_id(self.index_point(lat, lng)?))
    }

    fn tiler_for(&self, bbox: &BoundingBox) -> BiodivResult<Tiler> {
        bbox.validate()?;

        // Boxes never cross the antimeridian, so wide boxes must not be split.
        let mut tiler = TilerBuilder::new(CELL_RESOLUTION)
            .containment_mode(ContainmentMode::Covers)
            .disable_transmeridian_heuristic()
            .build();
        tiler
            .add(viewport_rect(bbox).to_polygon())
            .map_err(|e| BiodivError::InvalidBbox(format!("cannot tile {:?}: {}", bbox, e)))?;
        Ok(tiler)
    }

    fn index_point(&self, lat: f64, lng: f64) -> BiodivResult<CellIndex> {
        let ll = LatLng::new(lat, lng)
            .map_err(|e| BiodivError::InvalidBbox(format!("invalid point ({}, {}): {}", lat, lng, e)))?;
        Ok(ll.to_cell(CELL_RESOLUTION))
    }

    fn parse_cell(&self, cell: &CellId) -> BiodivResult<CellIndex> {
        let index: CellIndex = cell
            .as_str()
            .parse()
            .map_err(|e| BiodivError::InvalidCell(format!("{}: {}", cell, e)))?;

        if index.resolution() != CELL_RESOLUTION {
            return Err(BiodivError::InvalidCell(format!(
                "{} has resolution {:?}, expected {:?}",
                cell,
                index.resolution(),
                CELL_RESOLUTION
            )));
        }
        Ok(index)
    }
}

/// The box as a `geo` rectangle, x = longitude, y = latitude.
///
/// A zero extent is widened by a hair so the rectangle keeps a non-empty area.
pub fn viewport_rect(bbox: &BoundingBox) -> Rect<f64> {
    let (west, east) = widen(bbox.west, bbox.east, 180.0);
    let (south, north) = widen(bbox.south, bbox.north, 90.0);
    Rect::new(coord! { x: west, y: south }, coord! { x: east, y: north })
}

fn widen(low: f64, high: f64, limit: f64) -> (f64, f64) {
    if high > low {
        (low, high)
    } else if high + DEGENERATE_PAD_DEG <= limit {
        (low, high + DEGENERATE_PAD_DEG)
    } else {
        (low - DEGENERATE_PAD_DEG, high)
    }
}

fn to_cell_id(index: CellIndex) -> CellId {
    CellId::new(index.to_string())
}

fn boundary_of(index: CellIndex) -> CellPolygon {
    let vertices = index
        .boundary()
        .iter()
        .map(|ll| (ll.lng(), ll.lat()))
        .collect();
    CellPolygon::from_vertices(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_has_fixed_resolution() {
        let indexer = SpatialIndexer::new();
        let id = indexer.cell_at(52.5163, 13.3777).unwrap();
        let polygon = indexer.cell_polygon(&id).unwrap();
        assert!(polygon.vertices().len() >= 6);
        assert_eq!(polygon.ring().first(), polygon.ring().last());
    }

    #[test]
    fn test_rejects_foreign_resolution() {
        let indexer = SpatialIndexer::new();
        let coarse = LatLng::new(52.5, 13.4).unwrap().to_cell(Resolution::Five);
        let id = CellId::new(coarse.to_string());
        assert!(matches!(
            indexer.cell_polygon(&id),
            Err(BiodivError::InvalidCell(_))
        ));
    }

    #[test]
    fn test_rejects_garbage_cell_id() {
        let indexer = SpatialIndexer::new();
        assert!(matches!(
            indexer.cell_polygon(&CellId::new("not-a-cell")),
            Err(BiodivError::InvalidCell(_))
        ));
    }

    #[test]
    fn test_zero_height_box_is_widened() {
        let rect = viewport_rect(&BoundingBox::new(13.30, 52.50, 13.32, 52.50));
        assert!(rect.height() > 0.0);
        assert_eq!(rect.width(), 13.32 - 13.30);
    }

    #[test]
    fn test_widening_stays_inside_the_pole() {
        let rect = viewport_rect(&BoundingBox::new(0.0, 90.0, 1.0, 90.0));
        assert!(rect.max().y <= 90.0);
        assert!(rect.min().y < 90.0);
    }

    #[test]
    fn test_size_hint_bounds_cover() {
        let indexer = SpatialIndexer::new();
        let bbox = BoundingBox::new(13.30, 52.49, 13.42, 52.54);
        let hint = indexer.cover_size_hint(&bbox).unwrap();
        assert!(hint >= indexer.cover(&bbox).unwrap().len());
    }
}
