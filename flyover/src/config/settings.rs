//! Validated runtime settings.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use super::defaults::*;
use super::file::{ConfigError, ConfigFile, ConfigResult};
use crate::coord::{BoundingBox, BoundingBoxMode, Coordinate};
use crate::geocode::{geocode_with_retry, Geocoder};
use crate::retry::RetryPolicy;
use crate::shutdown::Sleeper;

/// Where home is, as given in the config.
#[derive(Debug, Clone, PartialEq)]
pub enum HomeLocation {
    Coordinates(Coordinate),
    /// Needs geocoding before use.
    Address(String),
}

impl fmt::Display for HomeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeLocation::Coordinates(coord) => write!(f, "{}", coord),
            HomeLocation::Address(address) => write!(f, "'{}' (to be geocoded)", address),
        }
    }
}

/// Read-only settings, loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub home: HomeLocation,
    pub radius_miles: f64,
    pub api_key: String,
    pub poll_interval: Duration,
    pub bounding_box_mode: BoundingBoxMode,
    pub timeout_secs: u64,
    pub feed_url: String,
    pub lookup_url: String,
    pub geocoder_url: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load and validate the config file at `path`.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let settings = Self::from_config(ConfigFile::load_from(path)?)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(settings)
    }

    /// Validate a parsed config file and fill in defaults.
    pub fn from_config(config: ConfigFile) -> ConfigResult<Self> {
        let radius_miles = config.radius.ok_or(ConfigError::Missing("radius"))?;
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(invalid("radius", radius_miles, "must be a positive number of miles"));
        }

        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or(ConfigError::Missing("apiKey"))?;

        let rate = config.rate.unwrap_or(DEFAULT_RATE_SECS);
        if rate == 0 {
            return Err(invalid("rate", rate, "must be at least 1 second"));
        }

        let timeout_secs = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(invalid("timeoutSecs", timeout_secs, "must be at least 1 second"));
        }

        let bounding_box_mode = match config.bounding_box.as_deref() {
            None => BoundingBoxMode::default(),
            Some(value) => BoundingBoxMode::from_config_str(value)
                .ok_or_else(|| invalid("boundingBox", value, "expected 'geodesic' or 'degrees'"))?,
        };

        let home = parse_home(&config)?;

        Ok(Self {
            home,
            radius_miles,
            api_key,
            poll_interval: Duration::from_secs(rate),
            bounding_box_mode,
            timeout_secs,
            feed_url: config.feed_url.unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            lookup_url: config
                .lookup_url
                .unwrap_or_else(|| DEFAULT_LOOKUP_URL.to_string()),
            geocoder_url: config
                .geocoder_url
                .unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string()),
            log_file: config.log_file,
        })
    }

    /// Home coordinate, geocoding the address if that is all we have.
    pub fn resolve_home<G, S>(
        &self,
        geocoder: &G,
        policy: &RetryPolicy,
        sleeper: &S,
    ) -> ConfigResult<Coordinate>
    where
        G: Geocoder + ?Sized,
        S: Sleeper + ?Sized,
    {
        match &self.home {
            HomeLocation::Coordinates(coord) => Ok(*coord),
            HomeLocation::Address(address) => {
                let coord = geocode_with_retry(geocoder, address, policy, sleeper)?;
                info!(%coord, "Geocoded home address");
                Ok(coord)
            }
        }
    }

    /// The feed query window around `home`.
    pub fn bounding_box(&self, home: Coordinate) -> ConfigResult<BoundingBox> {
        BoundingBox::around(home, self.radius_miles, self.bounding_box_mode)
            .map_err(|e| invalid("radius", self.radius_miles, &e.to_string()))
    }

    /// API key with all but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

fn parse_home(config: &ConfigFile) -> ConfigResult<HomeLocation> {
    let location = &config.location;

    if let (Some(lat), Some(lon)) = (location.lat, location.lon) {
        let coord = Coordinate::validated(lat, lon).map_err(|e| {
            invalid("location", format!("{}, {}", lat, lon), &e.to_string())
        })?;
        return Ok(HomeLocation::Coordinates(coord));
    }

    location
        .address
        .as_deref()
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(|address| HomeLocation::Address(address.to_string()))
        .ok_or(ConfigError::Missing("location.lat/location.lon"))
}

fn invalid(key: &'static str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
