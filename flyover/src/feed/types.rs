//! State feed types and traits

use thiserror::Error;

use crate::coord::{BoundingBox, Coordinate};
use crate::http::HttpError;

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors that can occur while fetching state vectors.
///
/// All of these are transient from the poll loop's point of view.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    /// HTTP request failed
    #[error("State feed request failed: {0}")]
    Http(#[from] HttpError),

    /// Response was not the expected JSON shape
    #[error("Invalid state feed response: {0}")]
    Parse(String),
}

/// One observed aircraft at a point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateVector {
    /// ICAO 24-bit transponder address (hex).
    pub icao24: String,
    /// Callsign, trimmed of surrounding whitespace (may be empty).
    pub callsign: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Barometric altitude in meters.
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    /// Ground speed in m/s.
    pub velocity: Option<f64>,
    /// True track in degrees clockwise from north.
    pub true_track: Option<f64>,
}

impl StateVector {
    /// Create a state vector with a callsign and position (mainly for tests and tools).
    pub fn new(callsign: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            callsign: callsign.trim().to_string(),
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Self::default()
        }
    }

    /// Position of the aircraft, if the feed reported one.
    pub fn position(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(Coordinate::new(lat, lon))
            }
            _ => None,
        }
    }

    /// The callsign, or `None` if it was blank.
    pub fn identifier(&self) -> Option<&str> {
        let id = self.callsign.trim();
        (!id.is_empty()).then_some(id)
    }
}

/// Source of aircraft state vectors inside a bounding box.
pub trait StateFeed {
    /// Fetch the current state vectors within `bbox`.
    fn fetch(&self, bbox: &BoundingBox) -> FeedResult<Vec<StateVector>>;

    /// Name for logging.
    fn name(&self) -> &str;
}

impl<F: StateFeed + ?Sized> StateFeed for &F {
    fn fetch(&self, bbox: &BoundingBox) -> FeedResult<Vec<StateVector>> {
        (**self).fetch(bbox)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
