//! Reporting service configuration.

use std::time::Duration;

use crate::reporter::ReporterConfig;
use crate::status::DEFAULT_EVENT_CAPACITY;

/// Configuration for a [`ReportingService`](super::ReportingService).
///
/// Bundles the per-delivery timeouts and the service-level bounds. The
/// sampling schedule lives on the position source itself. Defaults allow at
/// most four deliveries in flight.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Timeouts for each delivery attempt.
    pub reporter: ReporterConfig,

    /// Maximum concurrent delivery attempts. Samples arriving while all
    /// slots are busy get an immediate failed outcome rather than queueing
    /// unboundedly.
    pub max_in_flight: usize,

    /// How long `stop` waits for in-flight deliveries before abandoning them.
    pub stop_grace: Duration,

    /// Status event buffer per subscriber.
    pub event_capacity: usize,

    /// Buffered samples between source and delivery pump.
    pub sample_channel_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            reporter: ReporterConfig::default(),
            max_in_flight: 4,
            stop_grace: Duration::from_secs(15),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            sample_channel_capacity: 16,
        }
    }
}

impl ServiceConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-delivery timeouts.
    pub fn with_reporter(mut self, reporter: ReporterConfig) -> Self {
        self.reporter = reporter;
        self
    }

    /// Set the maximum number of concurrent deliveries.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Set the stop grace period.
    pub fn with_stop_grace(mut self, stop_grace: Duration) -> Self {
        self.stop_grace = stop_grace;
        self
    }

    /// Set the status event buffer capacity.
    pub fn with_event_capacity(mut self, event_capacity: usize) -> Self {
        self.event_capacity = event_capacity;
        self
    }
}
