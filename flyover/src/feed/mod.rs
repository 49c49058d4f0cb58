//! Aircraft state feed
//!
//! The poll loop only sees the [`StateFeed`] trait; [`OpenSkyFeed`] is the
//! production implementation.

mod opensky;
mod types;

pub use opensky::{parse_states, OpenSkyFeed, DEFAULT_OPENSKY_URL};
pub use types::{FeedError, FeedResult, StateFeed, StateVector};
