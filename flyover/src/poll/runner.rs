//! The polling loop.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::types::{CycleOutcome, PollConfig, PollError, PollOutcome, FEED_RETRY_BACKOFF};
use crate::feed::{StateFeed, StateVector};
use crate::origin::OriginLookup;
use crate::shutdown::Sleeper;
use crate::sink::FlightSink;
use crate::tracker::{select_closest, states_within_radius, FlightTracker};

/// Drives fetch, select, track and emit at a fixed interval.
///
/// Feed failures are retried forever with [`FEED_RETRY_BACKOFF`] between
/// attempts and never reach the caller. A failed origin lookup ends the
/// loop with [`PollError::Lookup`].
pub struct PollLoop<F, L, K, S>
where
    F: StateFeed,
    L: OriginLookup,
    K: FlightSink,
    S: Sleeper,
{
    config: PollConfig,
    feed: F,
    tracker: FlightTracker<L>,
    sink: K,
    sleeper: S,
    cycles: u64,
    feed_failures: u64,
}

impl<F, L, K, S> PollLoop<F, L, K, S>
where
    F: StateFeed,
    L: OriginLookup,
    K: FlightSink,
    S: Sleeper,
{
    /// Creates a poll loop with an idle tracker.
    ///
    /// # Arguments
    ///
    /// * `config` - Home, radius, bounding box and interval
    /// * `feed` - Source of state vectors
    /// * `lookup` - Origin resolver handed to the tracker
    /// * `sink` - Receives one report per cycle
    /// * `sleeper` - Performs the interval and backoff waits
    pub fn new(config: PollConfig, feed: F, lookup: L, sink: K, sleeper: S) -> Self {
        Self {
            config,
            feed,
            tracker: FlightTracker::new(lookup),
            sink,
            sleeper,
            cycles: 0,
            feed_failures: 0,
        }
    }

    /// Run until shutdown, `max_cycles`, or a fatal lookup error.
    pub fn run(&mut self) -> Result<PollOutcome, PollError> {
        info!(
            feed = self.feed.name(),
            home = %self.config.home,
            radius_miles = self.config.radius_miles,
            bbox = %self.config.bbox,
            interval_secs = self.config.interval.as_secs(),
            "Starting poll loop"
        );

        loop {
            if self.sleeper.is_shutdown() {
                return Ok(PollOutcome::Shutdown);
            }

            if self.run_cycle()? == CycleOutcome::Interrupted {
                return Ok(PollOutcome::Shutdown);
            }

            if self
                .config
                .max_cycles
                .is_some_and(|max| self.cycles >= max)
            {
                info!(cycles = self.cycles, "Cycle limit reached");
                return Ok(PollOutcome::Completed);
            }

            if !self.sleeper.sleep(self.config.interval) {
                return Ok(PollOutcome::Shutdown);
            }
        }
    }

    /// Run one fetch-select-track-emit cycle.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, PollError> {
        let Some(states) = self.fetch_with_retry() else {
            return Ok(CycleOutcome::Interrupted);
        };

        let nearby = states_within_radius(&states, self.config.home, self.config.radius_miles);
        debug!(
            fetched = states.len(),
            within_radius = nearby.len(),
            "Fetched state vectors"
        );

        let closest = select_closest(&states, self.config.home);
        let transition = self.tracker.observe(closest.as_deref())?;
        debug!(?transition, "Tracker updated");

        self.cycles += 1;
        let report = self.tracker.report(Utc::now());
        self.sink.emit(&report);

        Ok(CycleOutcome::Emitted(transition))
    }

    /// Fetch until success. `None` if shutdown interrupted the retries.
    fn fetch_with_retry(&mut self) -> Option<Vec<StateVector>> {
        loop {
            match self.feed.fetch(&self.config.bbox) {
                Ok(states) => return Some(states),
                Err(e) => {
                    self.feed_failures += 1;
                    warn!(
                        feed = self.feed.name(),
                        error = %e,
                        backoff_secs = FEED_RETRY_BACKOFF.as_secs(),
                        "State feed fetch failed, retrying"
                    );
                    if !self.sleeper.sleep(FEED_RETRY_BACKOFF) {
                        return None;
                    }
                }
            }
        }
    }

    pub fn tracker(&self) -> &FlightTracker<L> {
        &self.tracker
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Failed feed fetches so far.
    pub fn feed_failures(&self) -> u64 {
        self.feed_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{BoundingBox, Coordinate};
    use crate::feed::{FeedError, FeedResult};
    use crate::http::HttpError;
    use crate::origin::LookupError;
    use crate::shutdown::tests::RecordingSleeper;
    use crate::sink::MemorySink;
    use crate::tracker::Transition;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::time::Duration;

    const HOME: Coordinate = Coordinate::new(0.0, 0.0);

    /// Feed that replays a script of results, repeating the last one.
    struct ScriptedFeed {
        script: RefCell<VecDeque<FeedResult<Vec<StateVector>>>>,
        calls: RefCell<usize>,
    }

    impl ScriptedFeed {
        fn new(script: Vec<FeedResult<Vec<StateVector>>>) -> Self {
            Self {
                script: RefCell::new(script.into()),
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl StateFeed for ScriptedFeed {
        fn fetch(&self, _bbox: &BoundingBox) -> FeedResult<Vec<StateVector>> {
            *self.calls.borrow_mut() += 1;
            let mut script = self.script.borrow_mut();
            if script.len() > 1 {
                script.pop_front().unwrap_or_else(|| Ok(Vec::new()))
            } else {
                script.front().cloned().unwrap_or_else(|| Ok(Vec::new()))
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    /// Lookup that returns "K" + identifier and counts calls.
    #[derive(Default)]
    struct EchoLookup {
        calls: RefCell<Vec<String>>,
        fail: bool,
    }

    impl OriginLookup for EchoLookup {
        fn resolve(&self, ident: &str) -> Result<String, LookupError> {
            self.calls.borrow_mut().push(ident.to_string());
            if self.fail {
                Err(LookupError::Data {
                    ident: ident.to_string(),
                    reason: "no flights returned".to_string(),
                })
            } else {
                Ok(format!("K{}", ident))
            }
        }
    }

    fn config() -> PollConfig {
        let bbox = BoundingBox {
            min_lat: -1.0,
            max_lat: 1.0,
            min_lon: -1.0,
            max_lon: 1.0,
        };
        PollConfig::new(HOME, 50.0, bbox).with_interval(Duration::from_secs(60))
    }

    fn feed_error() -> FeedError {
        FeedError::Http(HttpError::Status {
            status: 503,
            url: "http://feed/states/all".to_string(),
        })
    }

    #[test]
    fn test_feed_failures_are_retried_with_backoff() {
        let feed = ScriptedFeed::new(vec![
            Err(feed_error()),
            Err(FeedError::Parse("truncated".to_string())),
            Ok(vec![StateVector::new("UAL1", 0.1, 0.1)]),
        ]);
        let lookup = EchoLookup::default();
        let sleeper = RecordingSleeper::new();

        let mut poll = PollLoop::new(
            config().with_max_cycles(Some(1)),
            &feed,
            &lookup,
            MemorySink::new(),
            &sleeper,
        );

        assert_eq!(poll.run().unwrap(), PollOutcome::Completed);
        assert_eq!(feed.calls(), 3);
        assert_eq!(poll.feed_failures(), 2);
        assert_eq!(sleeper.sleeps(), vec![FEED_RETRY_BACKOFF; 2]);
        assert_eq!(poll.sink().last().unwrap().ident, "UAL1");
    }

    #[test]
    fn test_same_closest_flight_looked_up_once() {
        let feed = ScriptedFeed::new(vec![Ok(vec![
            StateVector::new("FAR", 0.9, 0.9),
            StateVector::new("NEAR", 0.1, 0.0),
        ])]);
        let lookup = EchoLookup::default();
        let sleeper = RecordingSleeper::new();

        let mut poll = PollLoop::new(
            config().with_max_cycles(Some(3)),
            &feed,
            &lookup,
            MemorySink::new(),
            &sleeper,
        );

        assert_eq!(poll.run().unwrap(), PollOutcome::Completed);
        assert_eq!(*lookup.calls.borrow(), vec!["NEAR"]);
        assert_eq!(poll.cycles(), 3);
        // interval sleeps between cycles, none after the last
        assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(60); 2]);

        let reports = poll.sink().reports();
        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|r| r.ident == "NEAR" && r.origin == "KNEAR"));
    }

    #[test]
    fn test_empty_sky_keeps_previous_flight() {
        let feed = ScriptedFeed::new(vec![
            Ok(vec![StateVector::new("UAL1", 0.1, 0.1)]),
            Ok(Vec::new()),
        ]);
        let lookup = EchoLookup::default();
        let sleeper = RecordingSleeper::new();
        let mut poll = PollLoop::new(config(), &feed, &lookup, MemorySink::new(), &sleeper);

        poll.run_cycle().unwrap();
        let second = poll.run_cycle().unwrap();

        assert_eq!(second, CycleOutcome::Emitted(Transition::Retained));
        assert_eq!(poll.tracker().current_identifier(), "UAL1");
        assert_eq!(poll.sink().last().unwrap().origin, "KUAL1");
    }

    #[test]
    fn test_lookup_failure_is_fatal() {
        let feed = ScriptedFeed::new(vec![Ok(vec![StateVector::new("UAL1", 0.1, 0.1)])]);
        let lookup = EchoLookup {
            fail: true,
            ..EchoLookup::default()
        };
        let sleeper = RecordingSleeper::new();
        let mut poll = PollLoop::new(config(), &feed, &lookup, MemorySink::new(), &sleeper);

        let err = poll.run().unwrap_err();
        assert!(matches!(err, PollError::Lookup(LookupError::Data { .. })));
        assert!(err.to_string().contains("UAL1"));
        assert!(poll.sink().reports().is_empty());
        assert_eq!(poll.tracker().current_identifier(), "");
    }

    #[test]
    fn test_shutdown_during_interval_sleep() {
        let feed = ScriptedFeed::new(vec![Ok(Vec::new())]);
        let lookup = EchoLookup::default();
        let sleeper = RecordingSleeper::shutdown_after(2);
        let mut poll = PollLoop::new(config(), &feed, &lookup, MemorySink::new(), &sleeper);

        assert_eq!(poll.run().unwrap(), PollOutcome::Shutdown);
        assert_eq!(poll.cycles(), 2);
        assert_eq!(poll.sink().reports().len(), 2);
        assert!(poll.sink().reports().iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_shutdown_during_feed_backoff() {
        let feed = ScriptedFeed::new(vec![Err(feed_error())]);
        let lookup = EchoLookup::default();
        let sleeper = RecordingSleeper::shutdown_after(3);
        let mut poll = PollLoop::new(config(), &feed, &lookup, MemorySink::new(), &sleeper);

        assert_eq!(poll.run().unwrap(), PollOutcome::Shutdown);
        assert_eq!(feed.calls(), 3);
        assert_eq!(poll.cycles(), 0);
        assert_eq!(sleeper.sleeps(), vec![FEED_RETRY_BACKOFF; 3]);
    }

    #[test]
    fn test_closest_change_triggers_new_lookup() {
        let feed = ScriptedFeed::new(vec![
            Ok(vec![StateVector::new("UAL1", 0.1, 0.1)]),
            Ok(vec![
                StateVector::new("UAL1", 0.5, 0.5),
                StateVector::new("DAL2", 0.05, 0.0),
            ]),
        ]);
        let lookup = EchoLookup::default();
        let sleeper = RecordingSleeper::new();
        let mut poll = PollLoop::new(config(), &feed, &lookup, MemorySink::new(), &sleeper);

        poll.run_cycle().unwrap();
        let second = poll.run_cycle().unwrap();

        assert_eq!(
            second,
            CycleOutcome::Emitted(Transition::Changed {
                previous: Some("UAL1".to_string()),
                current: "DAL2".to_string(),
                origin: "KDAL2".to_string(),
            })
        );
        assert_eq!(*lookup.calls.borrow(), vec!["UAL1", "DAL2"]);
    }
}
