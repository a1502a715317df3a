//! Default configuration values.

/// Default sampling interval in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 10_000;

/// Default minimum spacing between samples in milliseconds.
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 5_000;

/// Default maximum acceptable delivery delay for a batch of samples,
/// in milliseconds.
pub const DEFAULT_MAX_DELAY_MS: u64 = 15_000;

/// Default listener port.
pub const DEFAULT_PORT: u16 = 12345;

/// Default listener host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default TCP connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default reply wait timeout in seconds.
pub const DEFAULT_REPLY_TIMEOUT_SECS: u64 = 5;

/// Default bound on concurrent delivery attempts.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Default grace period for draining in-flight deliveries on stop,
/// in seconds.
pub const DEFAULT_STOP_GRACE_SECS: u64 = 15;

/// Default state directory name under the geobeacon home directory.
pub const DEFAULT_STATE_DIR_NAME: &str = "state";
