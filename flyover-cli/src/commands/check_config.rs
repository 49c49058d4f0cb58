//! Check-config command - validate the config and show what it resolves to.

use std::path::Path;

use flyover::config::{HomeLocation, Settings};

use super::ConfigArgs;
use crate::error::CliError;
use crate::runner::{CliRunner, RunnerOptions};

/// Run the check-config command.
pub fn run(args: ConfigArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(&RunnerOptions {
        config: args.config,
        debug: args.debug,
        log_file: None,
    })?;

    print!("{}", describe(runner.settings(), runner.config_path())?);
    Ok(())
}

/// Human-readable summary of validated settings. The API key is masked.
pub fn describe(settings: &Settings, path: &Path) -> Result<String, CliError> {
    let mut out = String::new();
    let mut line = |label: &str, value: String| {
        out.push_str(&format!("  {:<14} {}\n", label, value));
    };

    line("Config file:", path.display().to_string());
    line("Home:", settings.home.to_string());
    line("Radius:", format!("{} mi", settings.radius_miles));
    line("Bounding box:", settings.bounding_box_mode.to_string());
    if let HomeLocation::Coordinates(home) = settings.home {
        line("Query window:", settings.bounding_box(home)?.to_string());
    }
    line("Poll every:", format!("{}s", settings.poll_interval.as_secs()));
    line("HTTP timeout:", format!("{}s", settings.timeout_secs));
    line("API key:", settings.masked_api_key());
    line("Feed:", settings.feed_url.clone());
    line("Lookup:", settings.lookup_url.clone());
    line("Geocoder:", settings.geocoder_url.clone());
    line(
        "Log file:",
        settings
            .log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(console only)".to_string()),
    );

    Ok(format!("Configuration OK\n\n{}", out))
}
