//! Timer-driven simulated position source.
//!
//! Produces samples along a linear path at the configured interval. Used for
//! development and tests; a real GNSS binding implements the same
//! [`PositionSource`] contract.

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::sample::PositionSample;
use super::source::{PositionSource, PositionSourceError, SourceConfig};

/// The path a [`SimulatedSource`] walks: a start position plus a per-sample step.
#[derive(Debug, Clone)]
pub struct SimulatedPath {
    /// Starting latitude in degrees.
    pub latitude: f64,
    /// Starting longitude in degrees.
    pub longitude: f64,
    /// Starting altitude in meters.
    pub altitude: f64,
    /// Latitude step per sample in degrees.
    pub latitude_step: f64,
    /// Longitude step per sample in degrees.
    pub longitude_step: f64,
    /// Altitude step per sample in meters.
    pub altitude_step: f64,
}

impl Default for SimulatedPath {
    fn default() -> Self {
        // Slow northeast drift from central Hamburg, ~10m per sample.
        Self {
            latitude: 53.5511,
            longitude: 9.9937,
            altitude: 15.0,
            latitude_step: 0.0001,
            longitude_step: 0.0001,
            altitude_step: 0.0,
        }
    }
}

impl SimulatedPath {
    /// Create a stationary path at the given position.
    pub fn stationary(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            latitude_step: 0.0,
            longitude_step: 0.0,
            altitude_step: 0.0,
        }
    }

    fn sample_at(&self, index: u64) -> PositionSample {
        let n = index as f64;
        PositionSample::new(
            self.latitude + n * self.latitude_step,
            self.longitude + n * self.longitude_step,
            self.altitude + n * self.altitude_step,
        )
    }
}

/// Timer-driven position source walking a [`SimulatedPath`].
///
/// The producer task ticks at `config.interval`, rate-limited by
/// `config.min_interval`, and stops as soon as the cancellation token fires
/// or the consumer drops its receiver. No sample is sent after cancellation
/// is observed.
pub struct SimulatedSource {
    config: SourceConfig,
    path: SimulatedPath,
    deny_access: bool,
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new(SourceConfig::default(), SimulatedPath::default())
    }
}

impl SimulatedSource {
    /// Create a simulated source with the given cadence and path.
    pub fn new(config: SourceConfig, path: SimulatedPath) -> Self {
        Self {
            config,
            path,
            deny_access: false,
        }
    }

    /// Create a source that fails `subscribe` with `PermissionDenied`.
    ///
    /// Models a platform that has not granted the location capability.
    pub fn with_access_denied() -> Self {
        Self {
            config: SourceConfig::default(),
            path: SimulatedPath::default(),
            deny_access: true,
        }
    }

    /// Get the configured cadence.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn run(
        config: SourceConfig,
        path: SimulatedPath,
        tx: mpsc::Sender<PositionSample>,
        cancel: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval(config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut samples_sent: u64 = 0;
        let mut last_sent: Option<Instant> = None;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Position source cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    if let Some(last) = last_sent {
                        if last.elapsed() < config.min_interval {
                            continue;
                        }
                    }

                    let sample = path.sample_at(samples_sent);
                    if tx.send(sample).await.is_err() {
                        debug!("Sample channel closed, stopping source");
                        break;
                    }
                    samples_sent += 1;
                    last_sent = Some(Instant::now());
                }
            }
        }

        info!(samples_sent, "Simulated position source stopped");
    }
}

impl PositionSource for SimulatedSource {
    fn subscribe(
        &self,
        tx: mpsc::Sender<PositionSample>,
        cancel: CancellationToken,
    ) -> Result<JoinHandle<()>, PositionSourceError> {
        if self.deny_access {
            warn!("Location capability unavailable, refusing subscription");
            return Err(PositionSourceError::PermissionDenied(
                "location capability not granted".to_string(),
            ));
        }

        info!(
            interval_ms = self.config.interval.as_millis() as u64,
            high_accuracy = self.config.high_accuracy,
            "Simulated position source started"
        );

        let config = self.config.clone();
        let path = self.path.clone();
        Ok(tokio::spawn(Self::run(config, path, tx, cancel)))
    }
}
