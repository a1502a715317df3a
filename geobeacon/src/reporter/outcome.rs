//! Delivery outcomes.

use chrono::{DateTime, Local};

use crate::time::format_local;

/// Message synthesized when the remote replies with nothing before closing.
pub const SENT_SUCCESSFULLY: &str = "sent successfully";

/// Message of the final outcome emitted when a session stops.
pub const STOPPED_MESSAGE: &str = "location reporting stopped";

/// The result of one delivery attempt.
///
/// One outcome is produced per sample, success or failure; each outcome is
/// persisted as the last-known delivery state and published to subscribers,
/// superseded by the next outcome (last completed write wins).
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryOutcome {
    /// Whether the record reached the remote listener.
    pub success: bool,

    /// The remote's reply line, or a human-readable diagnostic on failure.
    pub message: String,

    /// When this outcome was observed (attempt completion time).
    pub observed_at: DateTime<Local>,
}

impl DeliveryOutcome {
    /// A successful delivery with the given reply message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            observed_at: Local::now(),
        }
    }

    /// A failed delivery with the given diagnostic.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            observed_at: Local::now(),
        }
    }

    /// The outcome for a delivery the remote acknowledged with silence.
    pub fn sent_successfully() -> Self {
        Self::success(SENT_SUCCESSFULLY)
    }

    /// The final outcome emitted when the session stops.
    pub fn stopped() -> Self {
        Self::success(STOPPED_MESSAGE)
    }

    /// The observation time as `yyyy-MM-dd HH:mm:ss`.
    pub fn observed_at_formatted(&self) -> String {
        format_local(self.observed_at)
    }
}

impl std::fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = if self.success { "ok" } else { "failed" };
        write!(f, "[{}] {}", tag, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_outcome() {
        let outcome = DeliveryOutcome::success("received 1 record");
        assert!(outcome.success);
        assert_eq!(outcome.message, "received 1 record");
    }

    #[test]
    fn test_failure_outcome() {
        let outcome = DeliveryOutcome::failure("connect refused");
        assert!(!outcome.success);
        assert_eq!(outcome.message, "connect refused");
    }

    #[test]
    fn test_silent_reply_is_success() {
        let outcome = DeliveryOutcome::sent_successfully();
        assert!(outcome.success);
        assert_eq!(outcome.message, SENT_SUCCESSFULLY);
    }

    #[test]
    fn test_stopped_outcome() {
        let outcome = DeliveryOutcome::stopped();
        assert!(outcome.success);
        assert_eq!(outcome.message, STOPPED_MESSAGE);
    }

    #[test]
    fn test_formatted_timestamp_shape() {
        let outcome = DeliveryOutcome::sent_successfully();
        assert_eq!(outcome.observed_at_formatted().len(), 19);
    }

    #[test]
    fn test_display() {
        assert!(DeliveryOutcome::success("hi").to_string().starts_with("[ok]"));
        assert!(DeliveryOutcome::failure("no")
            .to_string()
            .starts_with("[failed]"));
    }
}
