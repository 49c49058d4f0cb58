//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and exit codes.

use std::fmt;
use std::process;

use flyover::config::ConfigError;
use flyover::feed::FeedError;
use flyover::geocode::GeocodeError;
use flyover::http::HttpError;
use flyover::origin::LookupError;
use flyover::poll::PollError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(ConfigError),
    /// Failed to create the HTTP client
    Http(HttpError),
    /// Standalone geocoding failed
    Geocode(GeocodeError),
    /// One-shot feed fetch failed
    Feed(FeedError),
    /// Poll loop stopped on a fatal error
    Poll(PollError),
    /// Failed to install the Ctrl-C handler
    SignalHandler(String),
}

impl CliError {
    /// Exit the process with an error message and code 1.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(ConfigError::NotFound(_)) | CliError::Config(ConfigError::Missing(_)) => {
                eprintln!();
                eprintln!("A config file needs at least:");
                eprintln!("  location:");
                eprintln!("    lat: <latitude>      # or address: \"<street address>\"");
                eprintln!("    lon: <longitude>");
                eprintln!("  radius: <miles>");
                eprintln!("  apiKey: <FlightAware AeroAPI key>");
                eprintln!();
                eprintln!("See config.example.yaml, or use --config <PATH>.");
            }
            CliError::Poll(PollError::Lookup(LookupError::Http { source, .. }))
                if matches!(source.status(), Some(401) | Some(403)) =>
            {
                eprintln!();
                eprintln!("FlightAware rejected the request. Check that apiKey is a valid AeroAPI key.");
            }
            CliError::Config(ConfigError::Geocode(_)) | CliError::Geocode(_) => {
                eprintln!();
                eprintln!("Set location.lat and location.lon directly to skip geocoding.");
                eprintln!("'flyover locate <ADDRESS>' prints coordinates to copy into the config.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Http(e) => write!(f, "HTTP client error: {}", e),
            CliError::Geocode(e) => write!(f, "Geocoding failed: {}", e),
            CliError::Feed(e) => write!(f, "Could not fetch aircraft states: {}", e),
            CliError::Poll(e) => write!(f, "Polling stopped: {}", e),
            CliError::SignalHandler(msg) => write!(f, "Failed to set signal handler: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Http(e) => Some(e),
            CliError::Geocode(e) => Some(e),
            CliError::Feed(e) => Some(e),
            CliError::Poll(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<HttpError> for CliError {
    fn from(e: HttpError) -> Self {
        CliError::Http(e)
    }
}

impl From<GeocodeError> for CliError {
    fn from(e: GeocodeError) -> Self {
        CliError::Geocode(e)
    }
}

impl From<FeedError> for CliError {
    fn from(e: FeedError) -> Self {
        CliError::Feed(e)
    }
}

impl From<PollError> for CliError {
    fn from(e: PollError) -> Self {
        CliError::Poll(e)
    }
}
