//! Persisted key constants.
//!
//! Every value the system retains across restarts lives under one of these
//! keys. Related keys (e.g. host and port, message and timestamp) are written
//! individually, not transactionally.

/// Host of the last configured connection target.
pub const LAST_HOST: &str = "last_host";

/// Port of the last configured connection target (decimal text).
pub const LAST_PORT: &str = "last_port";

/// Latitude of the last sampled position (decimal text).
pub const LAST_LATITUDE: &str = "last_latitude";

/// Longitude of the last sampled position (decimal text).
pub const LAST_LONGITUDE: &str = "last_longitude";

/// Altitude of the last sampled position (decimal text).
pub const LAST_ALTITUDE: &str = "last_altitude";

/// Message of the most recently completed delivery outcome.
pub const LAST_DELIVERY_MESSAGE: &str = "last_delivery_message";

/// Timestamp of the most recently completed delivery outcome
/// (`yyyy-MM-dd HH:mm:ss`).
pub const LAST_DELIVERY_AT: &str = "last_delivery_at";

/// Stable device identifier stamped into every delivery record.
pub const DEVICE_ID: &str = "device_id";
