//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! - [`run`] - Background reporting session until Ctrl+C
//! - [`send`] - One-shot delivery of a single position record
//! - [`status`] - Inspect persisted last-known state

pub mod run;
pub mod send;
pub mod status;

use std::path::PathBuf;

use geobeacon::config::ConfigFile;
use geobeacon::store::FileStateStore;

use crate::error::CliError;

/// Load configuration from the given path, or the default location.
pub fn load_config(path: Option<&PathBuf>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Open the state store configured in `config`.
pub fn open_store(config: &ConfigFile) -> Result<FileStateStore, CliError> {
    let dir = config.state.resolved_directory();
    Ok(FileStateStore::new(dir)?)
}
