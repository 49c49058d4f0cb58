//! Flyover - what's flying over my house
//!
//! Polls a bounding-box flight feed around a home location, keeps track of
//! the closest aircraft, and looks up where it departed from whenever the
//! closest aircraft changes.
//!
//! # Example
//!
//! ```ignore
//! use flyover::config::Settings;
//! use flyover::feed::OpenSkyFeed;
//! use flyover::http::ReqwestClient;
//! use flyover::origin::AeroApiResolver;
//! use flyover::poll::{PollConfig, PollLoop};
//! use flyover::shutdown::{Shutdown, ShutdownSleeper};
//! use flyover::sink::LogSink;
//!
//! let settings = Settings::load(path)?;
//! let home = settings.resolve_home(&geocoder, &policy, &sleeper)?;
//! let config = PollConfig::new(home, settings.radius_miles, settings.bounding_box(home)?)
//!     .with_interval(settings.poll_interval);
//!
//! let client = ReqwestClient::with_timeout(settings.timeout_secs)?;
//! let mut poll = PollLoop::new(
//!     config,
//!     OpenSkyFeed::with_base_url(&client, &settings.feed_url),
//!     AeroApiResolver::with_base_url(&client, &settings.api_key, &settings.lookup_url),
//!     LogSink::stdout(),
//!     ShutdownSleeper::new(Shutdown::new()),
//! );
//! poll.run()?;
//! ```

pub mod config;
pub mod coord;
pub mod feed;
pub mod geocode;
pub mod http;
pub mod logging;
pub mod origin;
pub mod poll;
pub mod retry;
pub mod shutdown;
pub mod sink;
pub mod tracker;

/// Version of the flyover library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
