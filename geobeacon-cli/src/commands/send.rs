//! Send command - one-shot delivery of a single position record.

use std::path::PathBuf;
use std::process;

use clap::Args;

use geobeacon::device;
use geobeacon::position::{PositionSample, SimulatedPath};
use geobeacon::reporter::{ConnectionTarget, SampleReporter};

use super::{load_config, open_store};
use crate::error::CliError;

/// Arguments for the send command.
#[derive(Args)]
pub struct SendArgs {
    /// Remote listener host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Remote listener port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Latitude in decimal degrees (defaults to the simulated position)
    #[arg(long, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, requires = "lat")]
    pub lon: Option<f64>,

    /// Altitude in meters
    #[arg(long, default_value = "0.0")]
    pub alt: f64,

    /// Path to an alternate config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the send command.
pub async fn run(args: SendArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(host) = args.host.clone() {
        config.connection.host = host;
    }
    if let Some(port) = args.port {
        config.connection.port = port;
    }
    let target: ConnectionTarget = config.target()?;

    let store = open_store(&config)?;
    let device_id = device::load_or_create(&store)?;

    // clap guarantees --lat and --lon arrive together or not at all.
    let sample = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => PositionSample::new(lat, lon, args.alt),
        _ => {
            let path = SimulatedPath::default();
            PositionSample::new(path.latitude, path.longitude, args.alt)
        }
    };

    println!("Sending {} to {}", sample, target);

    let reporter = SampleReporter::new(config.reporter_config(), device_id);
    let outcome = reporter.report(&sample, &target).await;

    println!("{}", outcome);
    if !outcome.success {
        process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SendArgs,
    }

    #[test]
    fn test_lat_alone_is_rejected() {
        assert!(TestCli::try_parse_from(["send", "--lat", "12.34"]).is_err());
    }

    #[test]
    fn test_lon_alone_is_rejected() {
        assert!(TestCli::try_parse_from(["send", "--lon", "9.99"]).is_err());
    }

    #[test]
    fn test_coordinate_pair_is_accepted() {
        let cli = TestCli::try_parse_from(["send", "--lat", "12.34", "--lon", "9.99"])
            .expect("both coordinates together should parse");
        assert_eq!(cli.args.lat, Some(12.34));
        assert_eq!(cli.args.lon, Some(9.99));
    }

    #[test]
    fn test_no_coordinates_is_accepted() {
        let cli = TestCli::try_parse_from(["send"]).expect("coordinates are optional");
        assert!(cli.args.lat.is_none());
        assert!(cli.args.lon.is_none());
    }
}
