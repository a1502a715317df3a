//! Run command - background reporting session until interrupted.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::info;

use geobeacon::logging::{init_logging, DEFAULT_LOG_FILE};
use geobeacon::position::{SimulatedPath, SimulatedSource};
use geobeacon::service::ReportingService;
use geobeacon::status::StatusEvent;

use super::{load_config, open_store};
use crate::error::CliError;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Remote listener host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Remote listener port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Sampling interval in milliseconds (overrides config)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Resume the target persisted by the previous session
    #[arg(long)]
    pub resume: bool,

    /// Path to an alternate config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the run command.
pub async fn run(args: RunArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_ref())?;

    // CLI flags override the config file
    if let Some(host) = args.host.clone() {
        config.connection.host = host;
    }
    if let Some(port) = args.port {
        config.connection.port = port;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.reporting.interval_ms = interval_ms;
    }

    let _logging_guard = init_logging(&config.logging.resolved_directory(), DEFAULT_LOG_FILE)
        .map_err(CliError::LoggingInit)?;

    info!(version = geobeacon::VERSION, "GeoBeacon starting");

    let store = Arc::new(open_store(&config)?);
    let source = Arc::new(SimulatedSource::new(
        config.source_config(),
        SimulatedPath::default(),
    ));
    let service = ReportingService::new(config.service_config(), source, store)?;

    println!("GeoBeacon v{}", geobeacon::VERSION);
    println!("Device id: {}", service.device_id());

    // Print status events as they arrive. The subscription is best-effort;
    // the persisted state remains the source of truth.
    let mut events = service.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(StatusEvent::PositionUpdated {
                    latitude,
                    longitude,
                    altitude,
                }) => {
                    println!("position: {:.6}, {:.6} (alt {:.1}m)", latitude, longitude, altitude);
                }
                Ok(StatusEvent::DeliveryCompleted {
                    success,
                    message,
                    timestamp,
                }) => {
                    let tag = if success { "ok" } else { "failed" };
                    println!("delivery [{}] {} ({})", tag, message, timestamp);
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let resume = args.resume || (config.reporting.resume_on_start && args.host.is_none());
    if resume {
        service.resume_last().await?;
        let target = service.target().await.expect("session just started");
        println!("Resumed reporting to {}", target);
    } else {
        let target = config.target()?;
        service.start(target.clone()).await?;
        println!("Reporting to {}", target);
    }
    println!("Press Ctrl+C to stop.");
    println!();

    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for Ctrl+C");

    println!();
    println!("Stopping...");
    service.stop().await;
    printer.abort();

    println!("Reporting stopped. Goodbye!");
    Ok(())
}
