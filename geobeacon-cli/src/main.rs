//! GeoBeacon CLI - Command-line interface
//!
//! This binary provides a command-line interface to the GeoBeacon library:
//! run a background reporting session, send a single position record, or
//! inspect the persisted last-known state.

mod commands;
mod error;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "geobeacon")]
#[command(version = geobeacon::VERSION)]
#[command(about = "Report device position to a remote TCP listener", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reporting session until interrupted
    Run(commands::run::RunArgs),
    /// Send a single position record and print the reply
    Send(commands::send::SendArgs),
    /// Show the persisted last-known state
    Status(commands::status::StatusArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Send(args) => commands::send::run(args).await,
        Commands::Status(args) => commands::status::run(args),
    };

    if let Err(e) = result {
        e.exit();
    }
}
