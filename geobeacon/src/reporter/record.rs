//! The wire-level delivery record.
//!
//! One record is sent per connection, as a single newline-terminated line of
//! compact JSON. Serialization goes through serde so the device identifier is
//! escaped correctly and numbers are formatted independent of locale.

use serde::{Deserialize, Serialize};

use crate::position::PositionSample;
use crate::time::format_local;

/// Marker value for the `android` field; the remote listener uses it to
/// distinguish record origins.
pub const ANDROID_MARKER: u8 = 1;

/// Wire payload for one delivery attempt.
///
/// Field names and order match the contract the remote listener expects:
///
/// ```json
/// {"android":1,"id":"<device>","date":"2024-01-01 10:00:00","latitude":12.34,"longitude":56.78,"altitude":9.0}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Origin marker, always [`ANDROID_MARKER`].
    pub android: u8,

    /// Stable device identifier.
    pub id: String,

    /// Sample timestamp, `yyyy-MM-dd HH:mm:ss` local time.
    pub date: String,

    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// Altitude in meters.
    pub altitude: f64,
}

impl DeliveryRecord {
    /// Build a record from a sample and the device identifier.
    pub fn new(sample: &PositionSample, device_id: &str) -> Self {
        Self {
            android: ANDROID_MARKER,
            id: device_id.to_string(),
            date: format_local(sample.timestamp),
            latitude: sample.latitude,
            longitude: sample.longitude,
            altitude: sample.altitude,
        }
    }

    /// Serialize to the newline-terminated wire line.
    pub fn to_wire_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn fixed_sample() -> PositionSample {
        let ts = Local.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        PositionSample::at(ts, 12.34, 56.78, 9.0)
    }

    #[test]
    fn test_record_round_trip_exact_values() {
        let record = DeliveryRecord::new(&fixed_sample(), "ABC123");
        let json = serde_json::to_string(&record).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["android"], 1);
        assert_eq!(value["id"], "ABC123");
        assert_eq!(value["date"], "2024-01-01 10:00:00");
        assert_eq!(value["latitude"], 12.34);
        assert_eq!(value["longitude"], 56.78);
        assert_eq!(value["altitude"], 9.0);

        let parsed: DeliveryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_wire_line_is_single_line() {
        let line = DeliveryRecord::new(&fixed_sample(), "ABC123")
            .to_wire_line()
            .unwrap();

        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_device_id_is_escaped() {
        let record = DeliveryRecord::new(&fixed_sample(), "weird\"id\\here");
        let line = record.to_wire_line().unwrap();

        // The embedded quote and backslash must not break the JSON.
        let parsed: DeliveryRecord = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed.id, "weird\"id\\here");
    }

    #[test]
    fn test_decimal_separator_is_a_point() {
        let line = DeliveryRecord::new(&fixed_sample(), "ABC123")
            .to_wire_line()
            .unwrap();

        assert!(line.contains("12.34"));
        assert!(!line.contains("12,34"));
    }
}
