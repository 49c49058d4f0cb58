//! Origin airport resolution
//!
//! [`OriginLookup`] is the seam the tracker calls when the closest aircraft
//! changes. [`AeroApiResolver`] implements it on FlightAware AeroAPI.

mod aeroapi;
mod types;

pub use aeroapi::{parse_origin, AeroApiResolver, API_KEY_HEADER, DEFAULT_AEROAPI_URL};
pub use types::{LookupError, LookupResult, OriginLookup};
