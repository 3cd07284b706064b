//! GeoJSON-shaped geometry values.
//!
//! Coordinates are `[longitude, latitude]` in SRID 4326. Validation is
//! structural only: finite values inside the WGS 84 bounds, and closed
//! polygon rings with at least four positions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Spatial reference identifier of every stored geometry.
pub const SRID: u32 = 4326;

/// A `[longitude, latitude]` pair.
pub type Position = [f64; 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PointKind {
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PolygonKind {
    Polygon,
}

/// Structural geometry errors. Rendered verbatim as form messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Coordinates must be finite numbers.")]
    NonFinite,

    #[error("Longitude {0} is outside [-180, 180].")]
    LongitudeOutOfRange(f64),

    #[error("Latitude {0} is outside [-90, 90].")]
    LatitudeOutOfRange(f64),

    #[error("Polygon must have at least one ring.")]
    NoRings,

    #[error("Polygon ring {ring} has {len} positions; at least 4 are required.")]
    RingTooShort { ring: usize, len: usize },

    #[error("Polygon ring {ring} is not closed.")]
    RingNotClosed { ring: usize },
}

fn validate_position([lon, lat]: Position) -> Result<(), GeometryError> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(GeometryError::NonFinite);
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(GeometryError::LongitudeOutOfRange(lon));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeometryError::LatitudeOutOfRange(lat));
    }
    Ok(())
}

/// A single location, e.g. a farm or an irrigation point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    #[serde(rename = "type")]
    pub kind: PointKind,
    pub coordinates: Position,
}

impl Point {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self {
            kind: PointKind::Point,
            coordinates: [lon, lat],
        }
    }

    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.coordinates[0]
    }

    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.coordinates[1]
    }

    /// # Errors
    ///
    /// Returns `GeometryError` if the position is not finite or out of bounds.
    pub fn validate(&self) -> Result<(), GeometryError> {
        validate_position(self.coordinates)
    }
}

/// A boundary with one exterior ring and optional holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Polygon {
    #[serde(rename = "type")]
    pub kind: PolygonKind,
    pub coordinates: Vec<Vec<Position>>,
}

impl Polygon {
    #[must_use]
    pub const fn new(rings: Vec<Vec<Position>>) -> Self {
        Self {
            kind: PolygonKind::Polygon,
            coordinates: rings,
        }
    }

    /// Build a polygon from an exterior ring, closing it if needed.
    #[must_use]
    pub fn from_exterior(mut ring: Vec<Position>) -> Self {
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }
        Self::new(vec![ring])
    }

    #[must_use]
    pub fn exterior(&self) -> Option<&[Position]> {
        self.coordinates.first().map(Vec::as_slice)
    }

    /// # Errors
    ///
    /// Returns `GeometryError` for empty polygons, short or open rings, and
    /// positions outside the WGS 84 bounds.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.coordinates.is_empty() {
            return Err(GeometryError::NoRings);
        }
        for (ring, positions) in self.coordinates.iter().enumerate() {
            if positions.len() < 4 {
                return Err(GeometryError::RingTooShort {
                    ring,
                    len: positions.len(),
                });
            }
            if positions.first() != positions.last() {
                return Err(GeometryError::RingNotClosed { ring });
            }
            for position in positions {
                validate_position(*position)?;
            }
        }
        Ok(())
    }
}
