//! Closest command - one fetch, no origin lookup.
//!
//! Useful for checking the radius and feed without spending AeroAPI quota.

use flyover::coord::{distance_miles, Coordinate};
use flyover::feed::{OpenSkyFeed, StateFeed, StateVector};
use flyover::shutdown::ThreadSleeper;
use flyover::tracker::{select_closest, states_within_radius};

use super::ConfigArgs;
use crate::error::CliError;
use crate::runner::{CliRunner, RunnerOptions};

/// Run the closest command.
pub fn run(args: ConfigArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(&RunnerOptions {
        config: args.config,
        debug: args.debug,
        log_file: None,
    })?;
    runner.log_startup("closest");

    let client = runner.http_client()?;
    let home = runner.resolve_home(&client, &ThreadSleeper)?;
    let config = runner.poll_config(home)?;

    let feed = OpenSkyFeed::with_base_url(&client, runner.settings().feed_url.as_str());
    let states = feed.fetch(&config.bbox)?;

    print!("{}", summarize(&states, home, config.radius_miles));
    Ok(())
}

/// Closest aircraft and the count inside the radius.
fn summarize(states: &[StateVector], home: Coordinate, radius_miles: f64) -> String {
    let nearby = states_within_radius(states, home, radius_miles).len();
    let header = format!(
        "{} aircraft in query window, {} within {} mi\n",
        states.len(),
        nearby,
        radius_miles
    );

    let closest = select_closest(states, home).and_then(|ident| {
        states
            .iter()
            .find(|s| s.identifier() == Some(ident.as_str()))
            .and_then(StateVector::position)
            .map(|position| (ident, distance_miles(home, position)))
    });

    match closest {
        Some((ident, miles)) => format!("{}Closest: {} at {:.1} mi\n", header, ident, miles),
        None => format!("{}No identifiable aircraft nearby\n", header),
    }
}
