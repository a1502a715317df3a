//! The position sample value type.

use chrono::{DateTime, Local};

/// One timestamped position reading.
///
/// Produced by a [`super::PositionSource`]; immutable once created. Ownership
/// passes to the reporter for the duration of one delivery attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSample {
    /// When this position was measured.
    pub timestamp: DateTime<Local>,

    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,

    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,

    /// Altitude in meters above sea level.
    pub altitude: f64,
}

impl PositionSample {
    /// Create a sample stamped with the current wall-clock time.
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self::at(Local::now(), latitude, longitude, altitude)
    }

    /// Create a sample with an explicit timestamp.
    pub fn at(timestamp: DateTime<Local>, latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            altitude,
        }
    }
}

impl std::fmt::Display for PositionSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.6}, {:.6}) alt {:.1}m",
            self.latitude, self.longitude, self.altitude
        )
    }
}
