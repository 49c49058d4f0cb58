//! Coordinate type definitions

use std::fmt;

use thiserror::Error;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Errors from coordinate validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    #[error("Latitude {0} outside valid range [-90, 90]")]
    InvalidLatitude(f64),

    #[error("Longitude {0} outside valid range [-180, 180]")]
    InvalidLongitude(f64),

    #[error("Radius {0} must be a positive, finite number of miles")]
    InvalidRadius(f64),
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without range checks.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    pub(crate) fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// How a mile-valued radius is turned into a lat/lon window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundingBoxMode {
    /// Convert miles to degrees, widening longitude with latitude.
    #[default]
    Geodesic,
    /// Apply the radius directly as a degree delta (legacy behavior).
    Degrees,
}

impl BoundingBoxMode {
    /// Parse from config file string.
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "geodesic" => Some(BoundingBoxMode::Geodesic),
            "degrees" => Some(BoundingBoxMode::Degrees),
            _ => None,
        }
    }
}

impl fmt::Display for BoundingBoxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundingBoxMode::Geodesic => write!(f, "geodesic"),
            BoundingBoxMode::Degrees => write!(f, "degrees"),
        }
    }
}

/// Rectangular lat/lon window used to scope the state feed query.
///
/// Invariant: `min_lat <= max_lat` and `min_lon <= max_lon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Returns true if the coordinate lies inside the box (edges inclusive).
    pub fn contains(&self, coord: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.latitude)
            && (self.min_lon..=self.max_lon).contains(&coord.longitude)
    }

    /// Latitude span in degrees.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude span in degrees.
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat [{:.4}, {:.4}] lon [{:.4}, {:.4}]",
            self.min_lat, self.max_lat, self.min_lon, self.max_lon
        )
    }
}
