//! Status events - best-effort session observability.
//!
//! The reporting session publishes an event after each position sample and
//! after each completed delivery. Publication never blocks the pipeline:
//! events ride a bounded broadcast channel, slow subscribers lose the oldest
//! events first, and publishing with no subscribers at all is a no-op.
//! Consumers needing every event should read the state store instead.

use tokio::sync::broadcast;
use tracing::trace;

use crate::position::PositionSample;
use crate::reporter::DeliveryOutcome;

/// Default broadcast capacity per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// An observable moment in the reporting session.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    /// A new position sample was taken.
    PositionUpdated {
        latitude: f64,
        longitude: f64,
        altitude: f64,
    },

    /// A delivery attempt completed, success or failure.
    DeliveryCompleted {
        success: bool,
        message: String,
        /// Completion time, `yyyy-MM-dd HH:mm:ss` local time.
        timestamp: String,
    },
}

impl StatusEvent {
    /// Event for a freshly taken sample.
    pub fn position_updated(sample: &PositionSample) -> Self {
        Self::PositionUpdated {
            latitude: sample.latitude,
            longitude: sample.longitude,
            altitude: sample.altitude,
        }
    }

    /// Event for a completed delivery attempt.
    pub fn delivery_completed(outcome: &DeliveryOutcome) -> Self {
        Self::DeliveryCompleted {
            success: outcome.success,
            message: outcome.message.clone(),
            timestamp: outcome.observed_at_formatted(),
        }
    }
}

/// Cloneable handle for publishing and subscribing to status events.
#[derive(Clone)]
pub struct StatusPublisher {
    tx: broadcast::Sender<StatusEvent>,
}

impl StatusPublisher {
    /// Create a publisher whose subscribers each buffer up to `capacity`
    /// events before the oldest are dropped.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Never blocks and never fails: with no subscribers the event is
    /// discarded.
    pub fn publish(&self, event: StatusEvent) {
        if self.tx.send(event).is_err() {
            trace!("Status event dropped: no subscribers");
        }
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.tx.subscribe()
    }

    /// Get the current number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for StatusPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_a_noop() {
        let publisher = StatusPublisher::default();
        assert_eq!(publisher.subscriber_count(), 0);
        publisher.publish(StatusEvent::PositionUpdated {
            latitude: 1.0,
            longitude: 2.0,
            altitude: 3.0,
        });
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_events() {
        let publisher = StatusPublisher::default();
        let mut rx = publisher.subscribe();

        let sample = PositionSample::new(53.55, 9.99, 6.0);
        publisher.publish(StatusEvent::position_updated(&sample));

        match rx.recv().await.unwrap() {
            StatusEvent::PositionUpdated {
                latitude,
                longitude,
                altitude,
            } => {
                assert_eq!(latitude, 53.55);
                assert_eq!(longitude, 9.99);
                assert_eq!(altitude, 6.0);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delivery_event_carries_outcome() {
        let publisher = StatusPublisher::default();
        let mut rx = publisher.subscribe();

        let outcome = DeliveryOutcome::failure("connect refused");
        publisher.publish(StatusEvent::delivery_completed(&outcome));

        match rx.recv().await.unwrap() {
            StatusEvent::DeliveryCompleted {
                success,
                message,
                timestamp,
            } => {
                assert!(!success);
                assert_eq!(message, "connect refused");
                assert_eq!(timestamp.len(), 19);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_subscriber_loses_oldest_events() {
        let publisher = StatusPublisher::new(2);
        let mut rx = publisher.subscribe();

        for i in 0..4 {
            publisher.publish(StatusEvent::PositionUpdated {
                latitude: i as f64,
                longitude: 0.0,
                altitude: 0.0,
            });
        }

        // The first recv reports the lag, then the newest two remain.
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(2))
        ));
        match rx.recv().await.unwrap() {
            StatusEvent::PositionUpdated { latitude, .. } => assert_eq!(latitude, 2.0),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
