//! Geocoding types and traits

use thiserror::Error;

use crate::coord::{CoordError, Coordinate};
use crate::http::HttpError;

/// Result type for geocoding.
pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// Errors that can occur while geocoding an address.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    #[error("Geocoder request failed: {0}")]
    Http(#[from] HttpError),

    #[error("Invalid geocoder response: {0}")]
    Parse(String),

    #[error("Geocoder returned an invalid position: {0}")]
    InvalidCoordinate(#[from] CoordError),

    #[error("No location found for address '{0}'")]
    NotFound(String),

    #[error("Geocoding gave up after {attempts} attempt(s): {reason}")]
    GaveUp { attempts: u32, reason: String },

    #[error("Geocoding interrupted by shutdown")]
    Interrupted,
}

/// Turns a free-form address into a coordinate.
pub trait Geocoder {
    /// Look up `address`.
    ///
    /// `Ok(None)` means the service answered but knows no such place.
    fn geocode(&self, address: &str) -> GeocodeResult<Option<Coordinate>>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str) -> GeocodeResult<Option<Coordinate>> {
        (**self).geocode(address)
    }
}
