//! Poll loop
//!
//! One cycle: fetch states for the bounding box (retrying on failure),
//! select the closest aircraft, update the tracker, emit a report. Cycles
//! repeat at the configured interval until shutdown.

mod runner;
mod types;

pub use runner::PollLoop;
pub use types::{
    CycleOutcome, PollConfig, PollError, PollOutcome, DEFAULT_POLL_INTERVAL, FEED_RETRY_BACKOFF,
};
