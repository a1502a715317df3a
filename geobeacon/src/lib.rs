//! GeoBeacon - background position reporting over TCP
//!
//! This library samples a device's geographic position on a schedule and
//! relays each sample as a one-line JSON record to a remote TCP listener,
//! capturing the remote acknowledgment and persisting last-known state so
//! reporting can resume after a restart.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides the full reporting
//! loop behind a simple facade:
//!
//! ```ignore
//! use std::sync::Arc;
//! use geobeacon::position::SimulatedSource;
//! use geobeacon::reporter::ConnectionTarget;
//! use geobeacon::service::{ReportingService, ServiceConfig};
//! use geobeacon::store::FileStateStore;
//!
//! let store = Arc::new(FileStateStore::new("state")?);
//! let source = Arc::new(SimulatedSource::default());
//! let service = ReportingService::new(ServiceConfig::default(), source, store)?;
//!
//! let target = ConnectionTarget::new("10.0.2.2", 12345)?;
//! service.start(target).await?;
//! ```
//!
//! # Components
//!
//! - [`position`] - Position samples and the source adapter contract
//! - [`reporter`] - Per-sample delivery over TCP and the wire record
//! - [`store`] - Durable last-known-value store
//! - [`status`] - Broadcast fan-out of status events
//! - [`service`] - Session lifecycle (start/stop) wiring it all together
//! - [`config`] - INI configuration file handling
//! - [`logging`] - Structured logging setup

pub mod config;
pub mod device;
pub mod logging;
pub mod position;
pub mod reporter;
pub mod service;
pub mod status;
pub mod store;
pub mod time;

/// Version of the GeoBeacon library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
