//! Origin lookup types and traits

use thiserror::Error;

use crate::http::HttpError;

/// Result type for origin lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors that can occur while resolving an origin airport.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    /// HTTP call failed or returned a non-success status
    #[error("Origin lookup for {ident} failed: {source}")]
    Http { ident: String, source: HttpError },

    /// Response body did not have the expected shape
    #[error("Origin lookup for {ident} returned an unparseable response: {reason}")]
    Parse { ident: String, reason: String },

    /// Response parsed but carried no usable airport code
    #[error("Origin lookup for {ident} returned no origin airport: {reason}")]
    Data { ident: String, reason: String },
}

impl LookupError {
    /// The identifier the failed lookup was keyed by.
    pub fn ident(&self) -> &str {
        match self {
            LookupError::Http { ident, .. }
            | LookupError::Parse { ident, .. }
            | LookupError::Data { ident, .. } => ident,
        }
    }
}

/// Resolves the departure airport for an aircraft identifier.
///
/// Implementations must not retry; retry policy belongs to the caller.
pub trait OriginLookup {
    /// Resolve the origin airport code for `ident`.
    fn resolve(&self, ident: &str) -> LookupResult<String>;
}

impl<L: OriginLookup + ?Sized> OriginLookup for &L {
    fn resolve(&self, ident: &str) -> LookupResult<String> {
        (**self).resolve(ident)
    }
}
