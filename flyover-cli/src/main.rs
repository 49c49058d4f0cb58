//! Flyover CLI - what's flying over my house
//!
//! # Commands
//!
//! - `flyover [run]`: poll the feed and show the closest flight and its origin
//! - `flyover locate <ADDRESS>`: print coordinates for an address
//! - `flyover check-config`: validate the config file
//! - `flyover closest`: one-shot closest aircraft without origin lookup
//!
//! Exit code is 0 on success or Ctrl+C, 1 on any error.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::locate::LocateArgs;
use commands::run::RunArgs;
use commands::ConfigArgs;

#[derive(Parser)]
#[command(name = "flyover")]
#[command(version = flyover::VERSION)]
#[command(about = "Show the aircraft closest to your house and where it took off from")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Options for the default `run` command
    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the feed and show the closest flight (default)
    Run(RunArgs),

    /// Geocode an address into coordinates for the config file
    Locate(LocateArgs),

    /// Validate the config file and show the resolved settings
    CheckConfig(ConfigArgs),

    /// Fetch once and show the closest aircraft without an origin lookup
    Closest(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => Commands::Run(cli.run),
    };

    let result = match command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Locate(args) => commands::locate::run(args),
        Commands::CheckConfig(args) => commands::check_config::run(args),
        Commands::Closest(args) => commands::closest::run(args),
    };

    if let Err(e) = result {
        e.exit();
    }
}
