//! Cell boundary rings.

use geo::{LineString, Polygon};

use biodiv_common::BoundingBox;

/// A closed ring of `(lng, lat)` points in degrees.
///
/// The first point is repeated as the last one. Vertex order is kept as
/// produced by the cell index, which is counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPolygon {
    ring: Vec<(f64, f64)>,
}

impl CellPolygon {
    /// Build a ring from open or closed vertices, closing it if needed.
    pub fn from_vertices(mut vertices: Vec<(f64, f64)>) -> Self {
        if let (Some(first), Some(last)) = (vertices.first().copied(), vertices.last().copied()) {
            if first != last {
                vertices.push(first);
            }
        }
        Self { ring: vertices }
    }

    /// Closed ring, first point repeated last.
    pub fn ring(&self) -> &[(f64, f64)] {
        &self.ring
    }

    /// Distinct vertices (ring without the closing point).
    pub fn vertices(&self) -> &[(f64, f64)] {
        match self.ring.len() {
            0 => &self.ring,
            n => &self.ring[..n - 1],
        }
    }

    /// Well-known-text form, e.g. `POLYGON((13.4 52.5, 13.41 52.5, ...))`.
    pub fn to_wkt(&self) -> String {
        let coords: Vec<String> = self
            .ring
            .iter()
            .map(|(lng, lat)| format!("{} {}", lng, lat))
            .collect();
        format!("POLYGON(({}))", coords.join(", "))
    }

    /// Axis-aligned bounds of the ring.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(self.ring.iter().copied())
    }

    /// The ring as a `geo` polygon, x = longitude, y = latitude.
    pub fn to_geo(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.ring.clone()), Vec::new())
    }
}
