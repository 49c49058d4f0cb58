//! Current flight of interest, carried across poll cycles.
//!
//! # State machine
//!
//! ```text
//!            closest = X, resolve ok
//!   Idle ───────────────────────────────▶ Tracking(X, origin)
//!                                             │   ▲
//!                      closest = Y != X,      │   │
//!                      resolve ok             └───┘
//! ```
//!
//! `None` or the same identifier never changes state and never calls the
//! lookup service. A failed lookup leaves the state untouched and is handed
//! back to the caller.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::origin::{LookupError, OriginLookup};

/// Tracker state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackerState {
    /// No flight tracked yet.
    #[default]
    Idle,
    /// Tracking a flight whose origin has been resolved.
    Tracking { ident: String, origin: String },
}

/// What a single observation did to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Closest aircraft is the one already tracked.
    Unchanged,
    /// No aircraft this cycle; previous state retained.
    Retained,
    /// A new aircraft became closest and its origin was resolved.
    Changed {
        /// Previously tracked identifier (`None` from idle).
        previous: Option<String>,
        current: String,
        origin: String,
    },
}

/// Per-cycle output for the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightReport {
    /// Tracked identifier, empty if nothing tracked yet.
    pub ident: String,
    /// Origin airport code, empty if nothing tracked yet.
    pub origin: String,
    pub observed_at: DateTime<Utc>,
}

impl FlightReport {
    /// True if nothing has been tracked yet.
    pub fn is_empty(&self) -> bool {
        self.ident.is_empty()
    }
}

impl fmt::Display for FlightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "no flight tracked")
        } else {
            write!(f, "{} from {}", self.ident, self.origin)
        }
    }
}

/// Holds the current identifier and origin, and decides when to look up.
pub struct FlightTracker<L: OriginLookup> {
    lookup: L,
    state: TrackerState,
    lookups: u64,
}

impl<L: OriginLookup> FlightTracker<L> {
    /// Create an idle tracker.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            state: TrackerState::Idle,
            lookups: 0,
        }
    }

    /// Feed one cycle's closest identifier into the tracker.
    ///
    /// # Arguments
    ///
    /// * `closest` - trimmed identifier of the closest aircraft, if any
    ///
    /// # Errors
    ///
    /// Returns the [`LookupError`] if the new identifier's origin could not be
    /// resolved. Identifier and origin are left as they were.
    pub fn observe(&mut self, closest: Option<&str>) -> Result<Transition, LookupError> {
        let Some(ident) = closest else {
            return Ok(Transition::Retained);
        };

        if ident == self.current_identifier() {
            return Ok(Transition::Unchanged);
        }

        self.lookups += 1;
        let origin = self.lookup.resolve(ident).map_err(|e| {
            error!(ident, error = %e, "Origin lookup failed");
            e
        })?;

        let previous = match &self.state {
            TrackerState::Idle => None,
            TrackerState::Tracking { ident: prior, .. } => Some(prior.clone()),
        };

        info!(
            previous = previous.as_deref().unwrap_or("-"),
            current = ident,
            origin = %origin,
            "Closest flight changed"
        );

        self.state = TrackerState::Tracking {
            ident: ident.to_string(),
            origin: origin.clone(),
        };

        Ok(Transition::Changed {
            previous,
            current: ident.to_string(),
            origin,
        })
    }

    /// Identifier of the tracked flight, empty when idle.
    pub fn current_identifier(&self) -> &str {
        match &self.state {
            TrackerState::Idle => "",
            TrackerState::Tracking { ident, .. } => ident,
        }
    }

    /// Origin airport of the tracked flight, empty when idle.
    pub fn current_origin_airport(&self) -> &str {
        match &self.state {
            TrackerState::Idle => "",
            TrackerState::Tracking { origin, .. } => origin,
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Number of lookups attempted so far.
    pub fn lookup_count(&self) -> u64 {
        self.lookups
    }

    /// Snapshot of the current state for output.
    pub fn report(&self, now: DateTime<Utc>) -> FlightReport {
        FlightReport {
            ident: self.current_identifier().to_string(),
            origin: self.current_origin_airport().to_string(),
            observed_at: now,
        }
    }
}
