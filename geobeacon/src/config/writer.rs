//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let state_directory = config
        .state
        .directory
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let log_directory = config
        .logging
        .directory
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    format!(
        r#"[reporting]
; Desired interval between position samples in milliseconds (default: 10000)
interval_ms = {}
; Minimum spacing between samples in milliseconds (default: 5000)
min_interval_ms = {}
; Maximum acceptable delivery delay in milliseconds (default: 15000)
max_delay_ms = {}
; Request high-accuracy positioning from the source (default: true)
high_accuracy = {}
; Resume the previously used connection target on startup (default: false)
resume_on_start = {}

[connection]
; Host of the remote listener
host = {}
; Port of the remote listener (default: 12345)
port = {}
; TCP connect timeout in seconds (default: 5)
connect_timeout_secs = {}
; How long to wait for the remote's reply line in seconds (default: 5)
reply_timeout_secs = {}

[delivery]
; Maximum concurrent delivery attempts (default: 4)
; Samples arriving while all slots are busy fail immediately.
max_in_flight = {}
; How long stop waits for in-flight deliveries in seconds (default: 15)
stop_grace_secs = {}

[state]
; Directory for persisted state (device id, last position, last outcome)
; If empty, defaults to ~/.geobeacon/state
directory = {}

[logging]
; Directory for log files
; If empty, defaults to ~/.geobeacon/logs
directory = {}
"#,
        config.reporting.interval_ms,
        config.reporting.min_interval_ms,
        config.reporting.max_delay_ms,
        config.reporting.high_accuracy,
        config.reporting.resume_on_start,
        config.connection.host,
        config.connection.port,
        config.connection.connect_timeout_secs,
        config.connection.reply_timeout_secs,
        config.delivery.max_in_flight,
        config.delivery.stop_grace_secs,
        state_directory,
        log_directory,
    )
}
