//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file. These are
//! pure data types with no parsing or serialization logic; conversion into
//! runtime configs happens through the methods on [`ConfigFile`].

use std::path::PathBuf;
use std::time::Duration;

use super::defaults::*;
use crate::position::SourceConfig;
use crate::reporter::{ConnectionTarget, ReporterConfig, TargetError};
use crate::service::ServiceConfig;
use crate::status::DEFAULT_EVENT_CAPACITY;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    /// Sampling schedule settings
    pub reporting: ReportingSettings,
    /// Remote listener settings
    pub connection: ConnectionSettings,
    /// Delivery concurrency and shutdown settings
    pub delivery: DeliverySettings,
    /// State store settings
    pub state: StateSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Sampling schedule configuration.
#[derive(Debug, Clone)]
pub struct ReportingSettings {
    /// Desired interval between samples in milliseconds.
    pub interval_ms: u64,
    /// Minimum spacing between samples in milliseconds.
    pub min_interval_ms: u64,
    /// Maximum acceptable delivery delay in milliseconds.
    pub max_delay_ms: u64,
    /// Request high-accuracy positioning from the source.
    pub high_accuracy: bool,
    /// Resume the previously persisted target on startup.
    pub resume_on_start: bool,
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            high_accuracy: true,
            resume_on_start: false,
        }
    }
}

/// Remote listener configuration.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Listener host.
    pub host: String,
    /// Listener port.
    pub port: u16,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Reply wait timeout in seconds.
    pub reply_timeout_secs: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            reply_timeout_secs: DEFAULT_REPLY_TIMEOUT_SECS,
        }
    }
}

/// Delivery concurrency and shutdown configuration.
#[derive(Debug, Clone)]
pub struct DeliverySettings {
    /// Maximum concurrent delivery attempts.
    pub max_in_flight: usize,
    /// Grace period for draining in-flight deliveries on stop, in seconds.
    pub stop_grace_secs: u64,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            stop_grace_secs: DEFAULT_STOP_GRACE_SECS,
        }
    }
}

/// State store configuration.
#[derive(Debug, Clone, Default)]
pub struct StateSettings {
    /// State directory. Defaults to `state/` under the geobeacon home
    /// directory when unset.
    pub directory: Option<PathBuf>,
}

impl StateSettings {
    /// Resolve the state directory, applying the default when unset.
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| super::config_directory().join(DEFAULT_STATE_DIR_NAME))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggingSettings {
    /// Log directory. Defaults to `logs/` under the geobeacon home
    /// directory when unset.
    pub directory: Option<PathBuf>,
}

impl LoggingSettings {
    /// Resolve the log directory, applying the default when unset.
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(crate::logging::default_log_dir)
    }
}

impl ConfigFile {
    /// Build the sampling schedule from the `[reporting]` section.
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            interval: Duration::from_millis(self.reporting.interval_ms),
            min_interval: Duration::from_millis(self.reporting.min_interval_ms),
            max_delay: Duration::from_millis(self.reporting.max_delay_ms),
            high_accuracy: self.reporting.high_accuracy,
        }
    }

    /// Build the per-delivery timeouts from the `[connection]` section.
    pub fn reporter_config(&self) -> ReporterConfig {
        ReporterConfig {
            connect_timeout: Duration::from_secs(self.connection.connect_timeout_secs),
            reply_timeout: Duration::from_secs(self.connection.reply_timeout_secs),
        }
    }

    /// Build the service configuration from the `[connection]` and
    /// `[delivery]` sections.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig::new()
            .with_reporter(self.reporter_config())
            .with_max_in_flight(self.delivery.max_in_flight)
            .with_stop_grace(Duration::from_secs(self.delivery.stop_grace_secs))
            .with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Build the connection target from the `[connection]` section.
    ///
    /// # Errors
    ///
    /// Returns a [`TargetError`] if the configured host or port is invalid.
    pub fn target(&self) -> Result<ConnectionTarget, TargetError> {
        ConnectionTarget::new(self.connection.host.clone(), self.connection.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let config = ConfigFile::default();
        assert_eq!(config.reporting.interval_ms, DEFAULT_INTERVAL_MS);
        assert_eq!(config.reporting.min_interval_ms, DEFAULT_MIN_INTERVAL_MS);
        assert!(config.reporting.high_accuracy);
        assert!(!config.reporting.resume_on_start);
        assert_eq!(config.connection.port, DEFAULT_PORT);
        assert_eq!(config.delivery.max_in_flight, DEFAULT_MAX_IN_FLIGHT);
    }

    #[test]
    fn test_source_config_conversion() {
        let config = ConfigFile::default();
        let source = config.source_config();
        assert_eq!(source.interval, Duration::from_millis(10_000));
        assert_eq!(source.min_interval, Duration::from_millis(5_000));
        assert_eq!(source.max_delay, Duration::from_millis(15_000));
    }

    #[test]
    fn test_service_config_conversion() {
        let mut config = ConfigFile::default();
        config.delivery.max_in_flight = 2;
        config.delivery.stop_grace_secs = 3;

        let service = config.service_config();
        assert_eq!(service.max_in_flight, 2);
        assert_eq!(service.stop_grace, Duration::from_secs(3));
    }

    #[test]
    fn test_target_conversion() {
        let config = ConfigFile::default();
        let target = config.target().unwrap();
        assert_eq!(target.port(), DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_target_is_rejected() {
        let mut config = ConfigFile::default();
        config.connection.host = String::new();
        assert!(config.target().is_err());
    }

    #[test]
    fn test_state_directory_default() {
        let settings = StateSettings::default();
        assert!(settings.resolved_directory().ends_with("state"));
    }
}
