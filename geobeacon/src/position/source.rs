//! The position source contract.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::sample::PositionSample;

/// Polling configuration for a position source.
///
/// A target interval, a floor between updates, a batching ceiling, and an
/// accuracy preference. Implementations honor what they can; the simulation
/// honors `interval` and `min_interval`.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Target interval between samples.
    pub interval: Duration,

    /// Minimum interval between samples (floor when fixes arrive early).
    pub min_interval: Duration,

    /// Maximum delay before buffered samples must be delivered.
    pub max_delay: Duration,

    /// Request high-accuracy fixes from the platform.
    pub high_accuracy: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            min_interval: Duration::from_secs(5),
            max_delay: Duration::from_secs(15),
            high_accuracy: true,
        }
    }
}

impl SourceConfig {
    /// Set the target sampling interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the minimum interval between samples.
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }
}

/// Error type for position sources.
#[derive(Debug, thiserror::Error)]
pub enum PositionSourceError {
    /// The platform denied access to the location capability.
    ///
    /// Fatal to the session: no samples are possible and the session never
    /// reaches Running.
    #[error("Location access denied: {0}")]
    PermissionDenied(String),

    /// The source failed to start for a non-permission reason.
    #[error("Position source failed: {0}")]
    StartFailed(String),
}

/// A producer of position samples.
///
/// `subscribe` either fails fast (permission denied, source unavailable) or
/// spawns a producer task that delivers samples into `tx` until `cancel`
/// fires. Implementations guarantee that no sample is sent after cancellation
/// has been observed, and that `subscribe` may be called again after a
/// previous subscription was cancelled.
pub trait PositionSource: Send + Sync {
    /// Start producing samples into `tx`.
    ///
    /// # Errors
    ///
    /// Returns [`PositionSourceError::PermissionDenied`] when the location
    /// capability is unavailable; no producer task is spawned in that case.
    fn subscribe(
        &self,
        tx: mpsc::Sender<PositionSample>,
        cancel: CancellationToken,
    ) -> Result<JoinHandle<()>, PositionSourceError>;
}
