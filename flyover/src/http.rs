//! HTTP client abstraction for testability
//!
//! Both external services (state feed and origin lookup) and the geocoder go
//! through [`HttpClient`], so tests can swap in [`MockHttpClient`] and never
//! touch the network.

use std::time::Duration;

use thiserror::Error;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("whats_flying_over_my_house/", env!("CARGO_PKG_VERSION"));

/// Transport-level errors shared by all HTTP consumers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Request could not be sent or timed out.
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// Response body could not be read.
    #[error("Failed to read response from {url}: {reason}")]
    Body { url: String, reason: String },

    /// HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl HttpError {
    /// The HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A GET request: URL plus query parameters and headers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Create a request for the given URL.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value by case-insensitive name.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Look up a query parameter value.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the response body.
    ///
    /// Non-success status codes are reported as [`HttpError::Status`].
    fn get(&self, request: &HttpRequest) -> Result<Vec<u8>, HttpError>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn get(&self, request: &HttpRequest) -> Result<Vec<u8>, HttpError> {
        (**self).get(request)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for std::sync::Arc<C> {
    fn get(&self, request: &HttpRequest) -> Result<Vec<u8>, HttpError> {
        (**self).get(request)
    }
}

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with the default timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, request: &HttpRequest) -> Result<Vec<u8>, HttpError> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(|e| HttpError::Request {
            url: request.url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: request.url.clone(),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| HttpError::Body {
                url: request.url.clone(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Mock HTTP client that replays queued responses and records requests.
    ///
    /// Once the queue is drained the last response is repeated.
    pub struct MockHttpClient {
        responses: Mutex<VecDeque<Result<Vec<u8>, HttpError>>>,
        last: Mutex<Option<Result<Vec<u8>, HttpError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockHttpClient {
        pub fn new(responses: Vec<Result<Vec<u8>, HttpError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                last: Mutex::new(None),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_body(body: &str) -> Self {
            Self::new(vec![Ok(body.as_bytes().to_vec())])
        }

        pub fn with_error(error: HttpError) -> Self {
            Self::new(vec![Err(error)])
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, request: &HttpRequest) -> Result<Vec<u8>, HttpError> {
            self.requests.lock().unwrap().push(request.clone());

            let next = self.responses.lock().unwrap().pop_front();
            let mut last = self.last.lock().unwrap();
            match next {
                Some(response) => {
                    *last = Some(response.clone());
                    response
                }
                None => last.clone().unwrap_or_else(|| {
                    Err(HttpError::Request {
                        url: request.url.clone(),
                        reason: "no mock response queued".to_string(),
                    })
                }),
            }
        }
    }

    #[test]
    fn test_mock_client_success() {
        let mock = MockHttpClient::with_body("hello");
        let result = mock.get(&HttpRequest::get("http://example.com"));
        assert_eq!(result.unwrap(), b"hello".to_vec());
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn test_mock_client_replays_in_order() {
        let mock = MockHttpClient::new(vec![
            Err(HttpError::Status {
                status: 503,
                url: "http://example.com".to_string(),
            }),
            Ok(b"ok".to_vec()),
        ]);
        let request = HttpRequest::get("http://example.com");

        assert_eq!(mock.get(&request).unwrap_err().status(), Some(503));
        assert_eq!(mock.get(&request).unwrap(), b"ok".to_vec());
        // drained: last response repeats
        assert_eq!(mock.get(&request).unwrap(), b"ok".to_vec());
    }

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::get("https://api.example.com/flights/UAL1")
            .query("ident_type", "designator")
            .query("max_pages", 1)
            .header("x-apikey", "secret");

        assert_eq!(request.url, "https://api.example.com/flights/UAL1");
        assert_eq!(request.query_value("ident_type"), Some("designator"));
        assert_eq!(request.query_value("max_pages"), Some("1"));
        assert_eq!(request.header_value("X-APIKEY"), Some("secret"));
        assert_eq!(request.header_value("accept"), None);
    }

    #[test]
    fn test_http_error_display() {
        let err = HttpError::Status {
            status: 401,
            url: "https://api.example.com".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 401 from https://api.example.com");
        assert_eq!(err.status(), Some(401));

        let err = HttpError::Client("tls".to_string());
        assert!(err.to_string().contains("Failed to create HTTP client"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_user_agent_names_project() {
        assert!(USER_AGENT.starts_with("whats_flying_over_my_house/"));
    }
}
