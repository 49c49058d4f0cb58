//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`run`] - Main command (poll and display the closest flight)
//! - [`locate`] - Geocode an address into coordinates
//! - [`check_config`] - Validate and show the configuration
//! - [`closest`] - One-shot closest aircraft, no origin lookup

pub mod check_config;
pub mod closest;
pub mod locate;
pub mod run;

use std::path::PathBuf;

use clap::Args;

/// `--config` option shared by commands that only read the config.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Config file (default: ./config.yaml, then ~/.flyover/config.yaml)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
