//! OpenStreetMap Nominatim geocoder.
//!
//! `GET {base}/search?q=<address>&format=json&limit=1` returns a JSON array
//! of places whose `lat`/`lon` are decimal strings.

use serde::Deserialize;
use tracing::debug;

use super::types::{GeocodeError, GeocodeResult, Geocoder};
use crate::coord::Coordinate;
use crate::http::{HttpClient, HttpRequest};

/// Default Nominatim base URL.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Geocoder backed by a Nominatim instance.
pub struct NominatimGeocoder<C: HttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: HttpClient> NominatimGeocoder<C> {
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, DEFAULT_NOMINATIM_URL)
    }

    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl<C: HttpClient> Geocoder for NominatimGeocoder<C> {
    fn geocode(&self, address: &str) -> GeocodeResult<Option<Coordinate>> {
        let request = HttpRequest::get(format!("{}/search", self.base_url))
            .query("q", address)
            .query("format", "json")
            .query("limit", 1);

        let body = self.http_client.get(&request)?;
        parse_places(&body)
    }
}

fn parse_places(body: &[u8]) -> GeocodeResult<Option<Coordinate>> {
    let places: Vec<Place> =
        serde_json::from_slice(body).map_err(|e| GeocodeError::Parse(e.to_string()))?;

    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    let lat = parse_degrees("lat", &place.lat)?;
    let lon = parse_degrees("lon", &place.lon)?;
    let coord = Coordinate::validated(lat, lon)?;

    debug!(
        place = place.display_name.as_deref().unwrap_or(""),
        %coord,
        "Geocoded address"
    );
    Ok(Some(coord))
}

fn parse_degrees(field: &str, value: &str) -> GeocodeResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| GeocodeError::Parse(format!("{} '{}' is not a number", field, value)))
}
