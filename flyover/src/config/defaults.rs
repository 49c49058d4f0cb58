//! Default values for configuration settings.

use std::time::Duration;

pub use crate::feed::DEFAULT_OPENSKY_URL as DEFAULT_FEED_URL;
pub use crate::geocode::DEFAULT_NOMINATIM_URL as DEFAULT_GEOCODER_URL;
pub use crate::http::DEFAULT_TIMEOUT_SECS;
pub use crate::origin::DEFAULT_AEROAPI_URL as DEFAULT_LOOKUP_URL;

/// Default poll interval in seconds.
pub const DEFAULT_RATE_SECS: u64 = 60;

/// Config file name searched for in each candidate directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Per-user config directory name under the home directory.
pub const CONFIG_DIR_NAME: &str = ".flyover";

/// Default poll interval as a duration.
pub fn default_poll_interval() -> Duration {
    Duration::from_secs(DEFAULT_RATE_SECS)
}
