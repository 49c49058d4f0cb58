//! OpenSky Network state feed.
//!
//! Queries the anonymous `states/all` REST endpoint restricted to a bounding
//! box. Each state is a heterogeneous JSON array:
//!
//! ```text
//!  0 icao24          string
//!  1 callsign        string | null (padded with spaces)
//!  2 origin_country  string
//!  3 time_position   int | null
//!  4 last_contact    int
//!  5 longitude       float | null
//!  6 latitude        float | null
//!  7 baro_altitude   float | null
//!  8 on_ground       bool
//!  9 velocity        float | null
//! 10 true_track      float | null
//! ```
//!
//! `"states": null` means there is no aircraft in the box.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::types::{FeedError, FeedResult, StateFeed, StateVector};
use crate::coord::BoundingBox;
use crate::http::{HttpClient, HttpRequest};

/// Default OpenSky REST API base URL.
pub const DEFAULT_OPENSKY_URL: &str = "https://opensky-network.org/api";

const IDX_ICAO24: usize = 0;
const IDX_CALLSIGN: usize = 1;
const IDX_LONGITUDE: usize = 5;
const IDX_LATITUDE: usize = 6;
const IDX_BARO_ALTITUDE: usize = 7;
const IDX_ON_GROUND: usize = 8;
const IDX_VELOCITY: usize = 9;
const IDX_TRUE_TRACK: usize = 10;

#[derive(Debug, Deserialize)]
struct StatesResponse {
    #[allow(dead_code)]
    time: Option<i64>,
    states: Option<Vec<Vec<Value>>>,
}

/// State feed backed by the OpenSky Network REST API.
pub struct OpenSkyFeed<C: HttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: HttpClient> OpenSkyFeed<C> {
    /// Creates a feed against the public OpenSky endpoint.
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, DEFAULT_OPENSKY_URL)
    }

    /// Creates a feed against a custom base URL (mirrors, tests).
    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn build_request(&self, bbox: &BoundingBox) -> HttpRequest {
        HttpRequest::get(format!("{}/states/all", self.base_url))
            .query("lamin", bbox.min_lat)
            .query("lomin", bbox.min_lon)
            .query("lamax", bbox.max_lat)
            .query("lomax", bbox.max_lon)
    }
}

impl<C: HttpClient> StateFeed for OpenSkyFeed<C> {
    fn fetch(&self, bbox: &BoundingBox) -> FeedResult<Vec<StateVector>> {
        let request = self.build_request(bbox);
        let body = self.http_client.get(&request)?;
        let states = parse_states(&body)?;
        debug!(count = states.len(), "OpenSky returned state vectors");
        Ok(states)
    }

    fn name(&self) -> &str {
        "OpenSky Network"
    }
}

/// Parse a `states/all` response body.
///
/// Rows without an icao24 address are skipped.
pub fn parse_states(body: &[u8]) -> FeedResult<Vec<StateVector>> {
    let response: StatesResponse =
        serde_json::from_slice(body).map_err(|e| FeedError::Parse(e.to_string()))?;

    let rows = response.states.unwrap_or_default();
    let states = rows.iter().filter_map(|row| parse_row(row)).collect();
    Ok(states)
}

fn parse_row(row: &[Value]) -> Option<StateVector> {
    let icao24 = row.get(IDX_ICAO24)?.as_str()?.to_string();

    let callsign = row
        .get(IDX_CALLSIGN)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let float_at = |idx: usize| row.get(idx).and_then(Value::as_f64);

    Some(StateVector {
        icao24,
        callsign,
        latitude: float_at(IDX_LATITUDE),
        longitude: float_at(IDX_LONGITUDE),
        baro_altitude: float_at(IDX_BARO_ALTITUDE),
        on_ground: row
            .get(IDX_ON_GROUND)
            .and_then(Value::as_bool)
            .unwrap_or(false),
        velocity: float_at(IDX_VELOCITY),
        true_track: float_at(IDX_TRUE_TRACK),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::tests::MockHttpClient;
    use crate::http::HttpError;

    const SAMPLE: &str = r#"{
        "time": 1700000000,
        "states": [
            ["a1b2c3", "UAL123  ", "United States", 1700000000, 1700000000,
             -122.3, 47.6, 10668.0, false, 230.5, 181.2, 0.0, null, 10900.0, "1234", false, 0],
            ["d4e5f6", null, "Canada", null, 1700000000,
             null, null, null, true, 0.0, null, null, null, null, null, false, 0],
            ["abcdef", "   ", "Mexico", 1700000000, 1700000000,
             -122.0, 47.0, 3000, false, 120, 90, -5.0, null, 3100.0, null, false, 0]
        ]
    }"#;

    fn bbox() -> BoundingBox {
        BoundingBox {
            min_lat: 46.0,
            max_lat: 48.0,
            min_lon: -123.0,
            max_lon: -121.0,
        }
    }

    #[test]
    fn test_parse_states_sample() {
        let states = parse_states(SAMPLE.as_bytes()).unwrap();
        assert_eq!(states.len(), 3);

        let first = &states[0];
        assert_eq!(first.icao24, "a1b2c3");
        assert_eq!(first.callsign, "UAL123");
        assert_eq!(first.latitude, Some(47.6));
        assert_eq!(first.longitude, Some(-122.3));
        assert_eq!(first.baro_altitude, Some(10668.0));
        assert!(!first.on_ground);
        assert_eq!(first.velocity, Some(230.5));
        assert_eq!(first.true_track, Some(181.2));

        let second = &states[1];
        assert_eq!(second.callsign, "");
        assert!(second.position().is_none());
        assert!(second.on_ground);

        // integer JSON numbers are accepted as floats
        let third = &states[2];
        assert_eq!(third.baro_altitude, Some(3000.0));
        assert_eq!(third.identifier(), None);
    }

    #[test]
    fn test_parse_null_states_is_empty() {
        let states = parse_states(br#"{"time": 1700000000, "states": null}"#).unwrap();
        assert!(states.is_empty());
    }

    #[test]
    fn test_parse_skips_rows_without_icao24() {
        let body = br#"{"time": 1, "states": [[null, "X"], [], ["abc123", "DAL9"]]}"#;
        let states = parse_states(body).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].callsign, "DAL9");
        assert!(states[0].position().is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_states(b"<html>rate limited</html>");
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_fetch_builds_bbox_query() {
        let client = MockHttpClient::with_body(SAMPLE);
        let feed = OpenSkyFeed::with_base_url(&client, "http://localhost:8080/api/");

        let states = feed.fetch(&bbox()).unwrap();
        assert_eq!(states.len(), 3);

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url, "http://localhost:8080/api/states/all");
        assert_eq!(request.query_value("lamin"), Some("46"));
        assert_eq!(request.query_value("lamax"), Some("48"));
        assert_eq!(request.query_value("lomin"), Some("-123"));
        assert_eq!(request.query_value("lomax"), Some("-121"));
    }

    #[test]
    fn test_fetch_propagates_http_error() {
        let client = MockHttpClient::with_error(HttpError::Status {
            status: 429,
            url: DEFAULT_OPENSKY_URL.to_string(),
        });
        let feed = OpenSkyFeed::new(&client);

        match feed.fetch(&bbox()) {
            Err(FeedError::Http(e)) => assert_eq!(e.status(), Some(429)),
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[test]
    fn test_feed_name() {
        let feed = OpenSkyFeed::new(MockHttpClient::with_body("{}"));
        assert_eq!(feed.name(), "OpenSky Network");
    }
}
