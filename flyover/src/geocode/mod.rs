//! Address geocoding
//!
//! Only used at startup when the config gives an address instead of
//! coordinates. Transient failures are retried a bounded number of times.

mod nominatim;
mod types;

pub use nominatim::{NominatimGeocoder, DEFAULT_NOMINATIM_URL};
pub use types::{GeocodeError, GeocodeResult, Geocoder};

use std::time::Duration;

use tracing::info;

use crate::coord::Coordinate;
use crate::retry::{retry_with_backoff, RetryError, RetryPolicy};
use crate::shutdown::Sleeper;

/// Attempts made before geocoding gives up.
pub const GEOCODE_MAX_ATTEMPTS: u32 = 3;

/// Wait between geocoding attempts.
pub const GEOCODE_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Default retry policy for geocoding.
pub fn default_geocode_policy() -> RetryPolicy {
    RetryPolicy::fixed(GEOCODE_MAX_ATTEMPTS, GEOCODE_RETRY_DELAY)
}

/// Geocode `address`, retrying failed requests according to `policy`.
///
/// A successful answer with no match is not retried and yields
/// [`GeocodeError::NotFound`].
pub fn geocode_with_retry<G, S>(
    geocoder: &G,
    address: &str,
    policy: &RetryPolicy,
    sleeper: &S,
) -> GeocodeResult<Coordinate>
where
    G: Geocoder + ?Sized,
    S: Sleeper + ?Sized,
{
    info!(address, "Geocoding home address");

    let found = retry_with_backoff(policy, sleeper, |attempt| {
        info!(attempt, max_attempts = policy.max_attempts(), "Geocoding attempt");
        geocoder.geocode(address)
    })
    .map_err(|e| match e {
        RetryError::Exhausted { attempts, last } => GeocodeError::GaveUp {
            attempts,
            reason: last.to_string(),
        },
        RetryError::Interrupted { .. } => GeocodeError::Interrupted,
    })?;

    found.ok_or_else(|| GeocodeError::NotFound(address.to_string()))
}
