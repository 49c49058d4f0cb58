//! Closest-flight tracking
//!
//! [`select_closest`] ranks one cycle's state vectors; [`FlightTracker`]
//! remembers the winner across cycles and only calls the origin lookup when
//! the winner changes.

mod flight;
mod selector;

pub use flight::{FlightReport, FlightTracker, TrackerState, Transition};
pub use selector::{select_closest, states_within_radius};
