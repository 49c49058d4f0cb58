//! Coordinate math
//!
//! Geodesic distance between positions and the bounding box that scopes the
//! state feed query around the home location.

mod types;

pub use types::{
    BoundingBox, BoundingBoxMode, Coordinate, CoordError, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON,
};

use geo::{Distance, Geodesic};

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// Smallest WGS84 radius of curvature, `a(1 - e²)` = 3936.6595 mi at the
/// equator, rounded down.
///
/// Every path on the ellipsoid is at least as long as the same path on a sphere
/// of this radius, so a box sized on that sphere covers the geodesic circle.
pub const MIN_CURVATURE_RADIUS_MILES: f64 = 3936.65;

/// Geodesic (WGS84 ellipsoid) distance between two coordinates in statute miles.
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    Geodesic.distance(a.to_point(), b.to_point()) / METERS_PER_MILE
}

impl BoundingBox {
    /// Derive the query window for everything within `radius_miles` of `home`.
    ///
    /// # Modes
    ///
    /// * [`BoundingBoxMode::Geodesic`] - the radius is converted to an angular
    ///   distance; the longitude delta grows with `1 / cos(latitude)` so the
    ///   box covers the full circle. When the circle reaches a pole the box
    ///   spans all longitudes.
    /// * [`BoundingBoxMode::Degrees`] - the radius is used directly as a degree
    ///   delta on both axes.
    ///
    /// The result is clamped to valid latitude and longitude ranges. The box is
    /// never split at the antimeridian, so near ±180° longitude points on the
    /// far side of it are not covered.
    pub fn around(
        home: Coordinate,
        radius_miles: f64,
        mode: BoundingBoxMode,
    ) -> Result<Self, CoordError> {
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(CoordError::InvalidRadius(radius_miles));
        }

        let (lat_delta, lon_delta) = match mode {
            BoundingBoxMode::Degrees => (radius_miles, Some(radius_miles)),
            BoundingBoxMode::Geodesic => geodesic_deltas(home.latitude, radius_miles),
        };

        let min_lat = (home.latitude - lat_delta).max(MIN_LAT);
        let max_lat = (home.latitude + lat_delta).min(MAX_LAT);

        let (min_lon, max_lon) = match lon_delta {
            Some(d) if d < 180.0 => (
                (home.longitude - d).max(MIN_LON),
                (home.longitude + d).min(MAX_LON),
            ),
            _ => (MIN_LON, MAX_LON),
        };

        Ok(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }
}

/// Latitude and longitude half-widths in degrees for a circle of the given radius.
///
/// Returns `None` for the longitude delta when the circle contains a pole.
fn geodesic_deltas(latitude: f64, radius_miles: f64) -> (f64, Option<f64>) {
    let angular = radius_miles / MIN_CURVATURE_RADIUS_MILES;
    let lat_delta = angular.to_degrees();

    let cos_lat = latitude.to_radians().cos();
    let sin_angular = angular.sin();

    // the circle reaches over a pole
    if angular >= std::f64::consts::FRAC_PI_2 || sin_angular >= cos_lat {
        return (lat_delta, None);
    }

    let lon_delta = (sin_angular / cos_lat).asin().to_degrees();
    (lat_delta, Some(lon_delta))
}
