//! Configuration
//!
//! `config.yaml` is parsed into [`ConfigFile`] and validated into
//! [`Settings`]. The file is looked up at an explicit path, then
//! `./config.yaml`, then `~/.flyover/config.yaml`.

mod defaults;
mod file;
mod settings;

pub use defaults::*;
pub use file::{
    config_directory, config_search_paths, resolve_config_path, ConfigError, ConfigFile,
    ConfigResult, LocationSection,
};
pub use settings::{HomeLocation, Settings};
