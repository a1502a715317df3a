//! CLI error handling with user-friendly messages.

use geobeacon::config::ConfigFileError;
use geobeacon::reporter::TargetError;
use geobeacon::service::ServiceError;
use geobeacon::store::StoreError;
use std::process;
use thiserror::Error;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug, Error)]
pub enum CliError {
    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigFileError),

    /// Invalid connection target
    #[error("Invalid connection target: {0}")]
    Target(#[from] TargetError),

    /// State store error
    #[error("State store error: {0}")]
    Store(#[from] StoreError),

    /// Reporting service error
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Service(ServiceError::NoPreviousTarget) => {
                eprintln!();
                eprintln!("No previous session found. Specify a target explicitly:");
                eprintln!("  geobeacon run --host <HOST> --port <PORT>");
            }
            CliError::Service(ServiceError::PermissionDenied(_)) => {
                eprintln!();
                eprintln!("The position source refused access. Check that the");
                eprintln!("process is allowed to read device position.");
            }
            _ => {}
        }

        process::exit(1)
    }
}
