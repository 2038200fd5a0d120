//! Initial map viewport in Web Mercator.

use std::f64::consts::PI;

use serde::Serialize;

use biodiv_common::BoundingBox;

use crate::geolocation::Position;

/// Zoom level of the initial view, street scale.
pub const INITIAL_ZOOM: u8 = 17;

const TILE_SIZE_PX: f64 = 256.0;

/// Largest latitude representable in Web Mercator.
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSize {
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub center: Position,
    pub zoom: u8,
    /// `[west, south, east, north]`
    pub bbox: [f64; 4],
}

fn lat_to_mercator_y(lat_deg: f64) -> f64 {
    lat_deg.to_radians().tan().asinh()
}

fn mercator_y_to_lat(merc_y: f64) -> f64 {
    merc_y.sinh().atan().to_degrees()
}

/// Box visible at `zoom` for a map of `size` centered on `center`.
pub fn viewport_bbox(center: Position, zoom: u8, size: ViewportSize) -> BoundingBox {
    let world_px = TILE_SIZE_PX * 2f64.powi(zoom as i32);
    let radians_per_px = 2.0 * PI / world_px;

    let half_width_deg = (size.width_px as f64 / 2.0) * 360.0 / world_px;
    let half_height_y = (size.height_px as f64 / 2.0) * radians_per_px;

    let center_lat = center.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let y = lat_to_mercator_y(center_lat);

    BoundingBox::new(
        (center.lng - half_width_deg).max(-180.0),
        mercator_y_to_lat(y - half_height_y).max(-MAX_MERCATOR_LAT),
        (center.lng + half_width_deg).min(180.0),
        mercator_y_to_lat(y + half_height_y).min(MAX_MERCATOR_LAT),
    )
}

impl Viewport {
    pub fn around(center: Position, size: ViewportSize) -> Self {
        let bbox = viewport_bbox(center, INITIAL_ZOOM, size);
        Self {
            center,
            zoom: INITIAL_ZOOM,
            bbox: [bbox.west, bbox.south, bbox.east, bbox.north],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: ViewportSize = ViewportSize {
        width_px: 390,
        height_px: 844,
    };

    #[test]
    fn test_equator_width_at_zoom_17() {
        let bbox = viewport_bbox(Position { lat: 0.0, lng: 0.0 }, 17, PHONE);
        // 390 px at ~1.19 m/px is ~465 m, ~0.00418 degrees of longitude
        assert!((bbox.width() - 0.004_184).abs() < 1e-5, "width {}", bbox.width());
        assert!((bbox.south + bbox.north).abs() < 1e-12);
    }

    #[test]
    fn test_centered_and_valid_in_berlin() {
        let center = Position {
            lat: 52.5163,
            lng: 13.3777,
        };
        let bbox = viewport_bbox(center, INITIAL_ZOOM, PHONE);

        assert!(bbox.validate().is_ok());
        assert!(bbox.contains_point(center.lng, center.lat));
        assert!(bbox.height() > bbox.width());
        // Mercator stretches latitude: a tall screen covers under 600 m north-south
        assert!(bbox.height() < 0.006);
    }

    #[test]
    fn test_clamped_near_pole() {
        let bbox = viewport_bbox(Position { lat: 89.9, lng: 179.999 }, 3, PHONE);
        assert!(bbox.validate().is_ok());
        assert!(bbox.north <= MAX_MERCATOR_LAT);
        assert!(bbox.east <= 180.0);
    }
}
