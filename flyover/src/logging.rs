//! Logging infrastructure.
//!
//! Console output always goes to stderr so stdout stays free for flight
//! reports. An optional log file receives the same events without ANSI
//! colors. `RUST_LOG` overrides the default level unless debug is forced.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to prepare log file {}: {source}", .path.display())]
    LogFile { path: PathBuf, source: io::Error },

    #[error("Log file path {} has no file name", .0.display())]
    InvalidPath(PathBuf),

    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// What to log and where.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Force debug level regardless of `RUST_LOG`.
    pub debug: bool,
    /// Also append to this file.
    pub log_file: Option<PathBuf>,
}

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Default filter directive.
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Initialize the global subscriber.
///
/// # Errors
///
/// Fails if the log file's directory cannot be created or a global
/// subscriber is already installed.
pub fn init_logging(options: &LoggingOptions) -> Result<LoggingGuard, LoggingError> {
    let env_filter = if options.debug {
        EnvFilter::new(default_directive(true))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(false)))
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    let (file_layer, file_guard) = match &options.log_file {
        Some(path) => {
            let (dir, name) = prepare_log_file(path)?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Create the log file's directory and split the path for the appender.
fn prepare_log_file(path: &Path) -> Result<(PathBuf, PathBuf), LoggingError> {
    let name = path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(path.to_path_buf()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&dir).map_err(|source| LoggingError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok((dir, PathBuf::from(name)))
}
