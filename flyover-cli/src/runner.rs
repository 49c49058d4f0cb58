//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, and construction of
//! the HTTP-backed services shared by the command handlers.

use std::path::{Path, PathBuf};

use tracing::info;

use flyover::config::{config_search_paths, resolve_config_path, HomeLocation, Settings};
use flyover::coord::Coordinate;
use flyover::geocode::{default_geocode_policy, NominatimGeocoder};
use flyover::http::ReqwestClient;
use flyover::logging::{init_logging, LoggingGuard, LoggingOptions};
use flyover::poll::PollConfig;
use flyover::shutdown::Sleeper;

use crate::error::CliError;

/// Options shared by commands that read the config file.
#[derive(Debug, Clone, Default)]
pub struct RunnerOptions {
    /// Explicit config file path
    pub config: Option<PathBuf>,
    /// Force debug logging
    pub debug: bool,
    /// Log file, overriding `logFile` from the config
    pub log_file: Option<PathBuf>,
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    settings: Settings,
    config_path: PathBuf,
}

impl CliRunner {
    /// Load and validate the config, then initialize logging.
    pub fn new(options: &RunnerOptions) -> Result<Self, CliError> {
        let config_path = resolve_config_path(options.config.as_deref(), &config_search_paths())?;
        let settings = Settings::load(&config_path)?;

        let logging = LoggingOptions {
            debug: options.debug,
            log_file: options
                .log_file
                .clone()
                .or_else(|| settings.log_file.clone()),
        };
        let logging_guard =
            init_logging(&logging).map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            settings,
            config_path,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("Flyover v{}", flyover::VERSION);
        info!(
            config = %self.config_path.display(),
            "Flyover CLI: {} command",
            command
        );
    }

    /// HTTP client with the configured timeout.
    pub fn http_client(&self) -> Result<ReqwestClient, CliError> {
        Ok(ReqwestClient::with_timeout(self.settings.timeout_secs)?)
    }

    /// Home coordinate, geocoding the configured address if needed.
    pub fn resolve_home<S: Sleeper>(
        &self,
        client: &ReqwestClient,
        sleeper: &S,
    ) -> Result<Coordinate, CliError> {
        if let HomeLocation::Address(address) = &self.settings.home {
            println!("Locating '{}'...", address);
        }

        let geocoder = NominatimGeocoder::with_base_url(client, self.settings.geocoder_url.as_str());
        Ok(self
            .settings
            .resolve_home(&geocoder, &default_geocode_policy(), sleeper)?)
    }

    /// Poll loop parameters around `home`.
    pub fn poll_config(&self, home: Coordinate) -> Result<PollConfig, CliError> {
        let bbox = self.settings.bounding_box(home)?;
        Ok(PollConfig::new(home, self.settings.radius_miles, bbox)
            .with_interval(self.settings.poll_interval))
    }
}

/// Console-only logging for commands that run without a config file.
pub fn init_console_logging(debug: bool) -> Result<LoggingGuard, CliError> {
    init_logging(&LoggingOptions {
        debug,
        log_file: None,
    })
    .map_err(|e| CliError::LoggingInit(e.to_string()))
}
