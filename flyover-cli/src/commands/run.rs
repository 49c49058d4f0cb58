//! Run command - poll the feed and show the closest flight until stopped.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use flyover::config::ConfigError;
use flyover::feed::OpenSkyFeed;
use flyover::geocode::GeocodeError;
use flyover::origin::AeroApiResolver;
use flyover::poll::{PollLoop, PollOutcome};
use flyover::shutdown::{Shutdown, ShutdownSleeper};
use flyover::sink::LogSink;

use crate::error::CliError;
use crate::runner::{CliRunner, RunnerOptions};

/// Message shown on a clean interrupt.
pub const USER_EXIT_MESSAGE: &str = "exiting by user request";

/// Arguments for the run command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Config file (default: ./config.yaml, then ~/.flyover/config.yaml)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Stop after this many poll cycles
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub cycles: Option<u64>,
}

/// Run the run command.
pub fn run(args: RunArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(&RunnerOptions {
        config: args.config,
        debug: args.debug,
        log_file: args.log_file,
    })?;
    runner.log_startup("run");

    let shutdown = Shutdown::new();
    let handler_flag = shutdown.clone();
    ctrlc::set_handler(move || handler_flag.request())
        .map_err(|e| CliError::SignalHandler(e.to_string()))?;
    let sleeper = ShutdownSleeper::new(shutdown.clone());

    let client = runner.http_client()?;
    let home = match runner.resolve_home(&client, &sleeper) {
        Ok(home) => home,
        Err(CliError::Config(ConfigError::Geocode(GeocodeError::Interrupted))) => {
            return user_exit();
        }
        Err(e) => return Err(e),
    };

    let config = runner.poll_config(home)?.with_max_cycles(args.cycles);
    let settings = runner.settings();

    println!(
        "Watching {:.1} mi around {} every {}s (Ctrl+C to stop)",
        settings.radius_miles,
        home,
        settings.poll_interval.as_secs()
    );

    let mut poll = PollLoop::new(
        config,
        OpenSkyFeed::with_base_url(&client, settings.feed_url.as_str()),
        AeroApiResolver::with_base_url(
            &client,
            settings.api_key.as_str(),
            settings.lookup_url.as_str(),
        ),
        LogSink::stdout(),
        &sleeper,
    );

    match poll.run()? {
        PollOutcome::Shutdown => user_exit(),
        PollOutcome::Completed => {
            info!(
                cycles = poll.cycles(),
                lookups = poll.tracker().lookup_count(),
                feed_failures = poll.feed_failures(),
                "Finished"
            );
            Ok(())
        }
    }
}

fn user_exit() -> Result<(), CliError> {
    info!("{}", USER_EXIT_MESSAGE);
    println!("{}", USER_EXIT_MESSAGE);
    Ok(())
}
