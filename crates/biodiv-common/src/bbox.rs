//! Geographic bounding box for map viewports.

use serde::{Deserialize, Serialize};

use crate::error::{BiodivError, BiodivResult};

/// A WGS84 bounding box in degrees, described by its four extents.
///
/// Boxes crossing the antimeridian (`west > east`) are not representable;
/// the viewport is expected to be split by the caller in that case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Create a bounding box without validation.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Create a bounding box from north/south/east/west extents, validating ranges.
    pub fn from_extents(north: f64, south: f64, east: f64, west: f64) -> BiodivResult<Self> {
        let bbox = Self::new(west, south, east, north);
        bbox.validate()?;
        Ok(bbox)
    }

    /// Parse the query form "west,south,east,north".
    pub fn from_query_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |p: &str| {
            p.parse::<f64>()
                .map_err(|_| BboxParseError::InvalidNumber(p.to_string()))
        };

        Ok(Self {
            west: parse(parts[0])?,
            south: parse(parts[1])?,
            east: parse(parts[2])?,
            north: parse(parts[3])?,
        })
    }

    /// Check that extents are finite, ordered and inside WGS84 limits.
    pub fn validate(&self) -> BiodivResult<()> {
        let values = [self.west, self.south, self.east, self.north];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(BiodivError::InvalidBbox(format!(
                "non-finite extent in {:?}",
                self
            )));
        }
        if self.south < -90.0 || self.north > 90.0 {
            return Err(BiodivError::InvalidBbox(format!(
                "latitude out of range: south={}, north={}",
                self.south, self.north
            )));
        }
        if self.west < -180.0 || self.east > 180.0 {
            return Err(BiodivError::InvalidBbox(format!(
                "longitude out of range: west={}, east={}",
                self.west, self.east
            )));
        }
        if self.south > self.north {
            return Err(BiodivError::InvalidBbox(format!(
                "south ({}) is above north ({})",
                self.south, self.north
            )));
        }
        if self.west > self.east {
            return Err(BiodivError::InvalidBbox(format!(
                "west ({}) is east of east ({}); antimeridian crossing is unsupported",
                self.west, self.east
            )));
        }
        Ok(())
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Corner points as (lat, lng), ordered south-west, north-west, north-east, south-east.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.south, self.west),
            (self.north, self.west),
            (self.north, self.east),
            (self.south, self.east),
        ]
    }

    /// Check if this bbox intersects another. Touching edges count.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.west <= other.east
            && self.east >= other.west
            && self.south <= other.north
            && self.north >= other.south
    }

    /// Check if a point is contained within this bbox (edges inclusive).
    pub fn contains_point(&self, lng: f64, lat: f64) -> bool {
        lng >= self.west && lng <= self.east && lat >= self.south && lat <= self.north
    }

    /// Smallest bbox enclosing all `(lng, lat)` points, or `None` for an empty input.
    pub fn enclosing<I>(points: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points.into_iter().fold(None, |acc, (lng, lat)| {
            Some(match acc {
                None => BoundingBox::new(lng, lat, lng, lat),
                Some(b) => BoundingBox::new(
                    b.west.min(lng),
                    b.south.min(lat),
                    b.east.max(lng),
                    b.north.max(lat),
                ),
            })
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'west,south,east,north'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),
}

impl From<BboxParseError> for BiodivError {
    fn from(err: BboxParseError) -> Self {
        BiodivError::InvalidBbox(err.to_string())
    }
}
