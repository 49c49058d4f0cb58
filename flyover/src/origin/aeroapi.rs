//! FlightAware AeroAPI origin resolver.
//!
//! # API Endpoint
//!
//! `GET {base}/flights/{ident}?ident_type=designator` with the API key in the
//! `x-apikey` header. The response lists recent and scheduled flights for the
//! designator, most relevant first:
//!
//! ```text
//! {"flights": [{"ident": "UAL123", "origin": {"code": "KSFO", "code_icao": "KSFO", ...}, ...}, ...]}
//! ```
//!
//! Only the first entry is used.

use serde::Deserialize;
use tracing::debug;

use super::types::{LookupError, LookupResult, OriginLookup};
use crate::http::{HttpClient, HttpRequest};

/// Default AeroAPI base URL.
pub const DEFAULT_AEROAPI_URL: &str = "https://aeroapi.flightaware.com/aeroapi";

/// Header carrying the AeroAPI key.
pub const API_KEY_HEADER: &str = "x-apikey";

#[derive(Debug, Deserialize)]
struct FlightsResponse {
    flights: Vec<Flight>,
}

#[derive(Debug, Deserialize)]
struct Flight {
    origin: Option<Airport>,
}

#[derive(Debug, Deserialize)]
struct Airport {
    code_icao: Option<String>,
    code: Option<String>,
}

/// Origin resolver backed by FlightAware AeroAPI.
pub struct AeroApiResolver<C: HttpClient> {
    http_client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClient> AeroApiResolver<C> {
    /// Creates a resolver against the public AeroAPI endpoint.
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client for making requests
    /// * `api_key` - AeroAPI key sent as `x-apikey`
    pub fn new(http_client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(http_client, api_key, DEFAULT_AEROAPI_URL)
    }

    /// Creates a resolver against a custom base URL.
    pub fn with_base_url(
        http_client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn build_request(&self, ident: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/flights/{}", self.base_url, escape_path(ident)))
            .query("ident_type", "designator")
            .header(API_KEY_HEADER, self.api_key.as_str())
    }
}

impl<C: HttpClient> OriginLookup for AeroApiResolver<C> {
    fn resolve(&self, ident: &str) -> LookupResult<String> {
        let request = self.build_request(ident);
        debug!(ident, url = %request.url, "Requesting origin airport");

        let body = self
            .http_client
            .get(&request)
            .map_err(|source| LookupError::Http {
                ident: ident.to_string(),
                source,
            })?;

        parse_origin(ident, &body)
    }
}

/// Extract the origin airport code of the first flight in an AeroAPI response.
pub fn parse_origin(ident: &str, body: &[u8]) -> LookupResult<String> {
    let response: FlightsResponse =
        serde_json::from_slice(body).map_err(|e| LookupError::Parse {
            ident: ident.to_string(),
            reason: e.to_string(),
        })?;

    let flight = response
        .flights
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::Data {
            ident: ident.to_string(),
            reason: "no flights returned".to_string(),
        })?;

    let origin = flight.origin.ok_or_else(|| LookupError::Data {
        ident: ident.to_string(),
        reason: "flight has no origin".to_string(),
    })?;

    [origin.code_icao, origin.code]
        .into_iter()
        .flatten()
        .map(|code| code.trim().to_string())
        .find(|code| !code.is_empty())
        .ok_or_else(|| LookupError::Data {
            ident: ident.to_string(),
            reason: "origin airport code is empty".to_string(),
        })
}

/// Percent-encode everything outside the unreserved URL character set.
fn escape_path(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                escaped.push(byte as char)
            }
            _ => escaped.push_str(&format!("%{:02X}", byte)),
        }
    }
    escaped
}
