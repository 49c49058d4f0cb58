//! Poll loop configuration and results

use std::time::Duration;

use thiserror::Error;

use crate::coord::{BoundingBox, Coordinate};
use crate::origin::LookupError;
use crate::tracker::Transition;

/// Wait before retrying a failed feed fetch.
pub const FEED_RETRY_BACKOFF: Duration = Duration::from_secs(5);

/// Default poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Fixed parameters of a poll loop, derived once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    pub home: Coordinate,
    pub radius_miles: f64,
    pub bbox: BoundingBox,
    pub interval: Duration,
    /// Stop after this many cycles (`None` runs until shutdown).
    pub max_cycles: Option<u64>,
}

impl PollConfig {
    pub fn new(home: Coordinate, radius_miles: f64, bbox: BoundingBox) -> Self {
        Self {
            home,
            radius_miles,
            bbox,
            interval: DEFAULT_POLL_INTERVAL,
            max_cycles: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }
}

/// How a finished loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Shutdown was requested.
    Shutdown,
    /// The configured number of cycles ran.
    Completed,
}

/// Result of a single cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The tracker was updated and a report emitted.
    Emitted(Transition),
    /// Shutdown arrived while waiting to retry the feed.
    Interrupted,
}

/// Fatal poll loop errors.
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
