//! Status command - inspect the persisted last-known state.

use std::path::PathBuf;

use clap::Args;

use geobeacon::store::{keys, StateStore};

use super::{load_config, open_store};
use crate::error::CliError;

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Path to an alternate config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the status command.
pub fn run(args: StatusArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_ref())?;
    let store = open_store(&config)?;

    let value = |key: &str| -> Result<String, CliError> {
        Ok(store.get(key)?.unwrap_or_else(|| "-".to_string()))
    };

    println!("GeoBeacon v{}", geobeacon::VERSION);
    println!();
    println!("Device id:      {}", value(keys::DEVICE_ID)?);
    println!(
        "Last target:    {}:{}",
        value(keys::LAST_HOST)?,
        value(keys::LAST_PORT)?
    );
    println!(
        "Last position:  {}, {} (alt {}m)",
        value(keys::LAST_LATITUDE)?,
        value(keys::LAST_LONGITUDE)?,
        value(keys::LAST_ALTITUDE)?
    );
    println!(
        "Last delivery:  {} at {}",
        value(keys::LAST_DELIVERY_MESSAGE)?,
        value(keys::LAST_DELIVERY_AT)?
    );

    Ok(())
}
