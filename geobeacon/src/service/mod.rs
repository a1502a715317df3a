//! Reporting Service - the session lifecycle facade.
//!
//! [`ReportingService`] owns one reporting session at a time: it subscribes
//! to a position source, pumps each sample through a delivery attempt, and
//! persists and publishes what happened. Start and stop are idempotent and
//! the state is queryable at any time without side effects.
//!
//! # Architecture
//!
//! ```text
//! PositionSource --samples--> pump loop --spawn--> delivery task (bounded)
//!                                |                      |
//!                         persist position       persist outcome
//!                         publish event          publish event
//! ```
//!
//! The pump owns a [`CancellationToken`]; `stop` cancels it, waits up to the
//! grace period for in-flight deliveries to drain, and finally records the
//! session-closing outcome. Exactly one outcome is produced per sample: a
//! sample that finds all delivery slots busy fails immediately instead of
//! queueing.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use geobeacon::position::SimulatedSource;
//! use geobeacon::reporter::ConnectionTarget;
//! use geobeacon::service::{ReportingService, ServiceConfig};
//! use geobeacon::store::MemoryStateStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ReportingService::new(
//!     ServiceConfig::default(),
//!     Arc::new(SimulatedSource::default()),
//!     Arc::new(MemoryStateStore::new()),
//! )?;
//!
//! let target = ConnectionTarget::new("10.0.2.2", 12345)?;
//! service.start(target).await?;
//! // ... session runs in the background ...
//! service.stop().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod session;

use std::sync::{Arc, RwLock};

use tokio::sync::{mpsc, Mutex, Semaphore};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::device;
use crate::position::{PositionSample, PositionSource};
use crate::reporter::{ConnectionTarget, DeliveryOutcome, SampleReporter};
use crate::status::{StatusEvent, StatusPublisher};
use crate::store::{keys, StateStore};

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use session::SessionState;

/// Diagnostic for a sample dropped because all delivery slots were busy.
const CAPACITY_EXHAUSTED: &str = "delivery capacity exhausted";

/// Handles owned by a running session.
struct SessionHandles {
    cancel: CancellationToken,
    target: ConnectionTarget,
    source_handle: JoinHandle<()>,
    pump_handle: JoinHandle<()>,
}

/// Background position reporting session manager.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct ReportingService {
    config: ServiceConfig,
    source: Arc<dyn PositionSource>,
    store: Arc<dyn StateStore>,
    reporter: Arc<SampleReporter>,
    publisher: StatusPublisher,
    state: Arc<RwLock<SessionState>>,
    handles: Mutex<Option<SessionHandles>>,
    device_id: String,
}

impl ReportingService {
    /// Create a service over the given position source and state store.
    ///
    /// Loads (or generates and persists) the device identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StoreError`] if the device identifier cannot
    /// be loaded or persisted.
    pub fn new(
        config: ServiceConfig,
        source: Arc<dyn PositionSource>,
        store: Arc<dyn StateStore>,
    ) -> Result<Self, ServiceError> {
        let device_id = device::load_or_create(store.as_ref())?;
        let reporter = Arc::new(SampleReporter::new(config.reporter.clone(), device_id.clone()));
        let publisher = StatusPublisher::new(config.event_capacity);

        Ok(Self {
            config,
            source,
            store,
            reporter,
            publisher,
            state: Arc::new(RwLock::new(SessionState::Stopped)),
            handles: Mutex::new(None),
            device_id,
        })
    }

    /// Get the device identifier stamped into every delivery record.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Get the current session state. Never blocks on session work.
    pub fn state(&self) -> SessionState {
        *self.state.read().unwrap()
    }

    /// Whether the session is currently running.
    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Get the target of the running session, if any.
    pub async fn target(&self) -> Option<ConnectionTarget> {
        self.handles.lock().await.as_ref().map(|h| h.target.clone())
    }

    /// Subscribe to status events published after this call.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StatusEvent> {
        self.publisher.subscribe()
    }

    /// Start a reporting session against `target`.
    ///
    /// Persists the target as the last-known connection, subscribes to the
    /// position source, and spawns the delivery pump. Idempotent: if a
    /// session is already active the call is a no-op and returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the position source refuses access or fails to
    /// start, or if the target cannot be persisted. On error the service is
    /// left in [`SessionState::Stopped`].
    pub async fn start(&self, target: ConnectionTarget) -> Result<bool, ServiceError> {
        let mut handles = self.handles.lock().await;
        if handles.is_some() {
            debug!(state = %self.state(), "Start ignored: session already active");
            return Ok(false);
        }

        self.set_state(SessionState::Starting);
        info!(target = %target, "Starting reporting session");

        self.store.set(keys::LAST_HOST, target.host())?;
        self.store.set(keys::LAST_PORT, &target.port().to_string())?;

        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel(self.config.sample_channel_capacity);

        let source_handle = match self.source.subscribe(tx, cancel.clone()) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "Position source refused to start");
                self.set_state(SessionState::Stopped);
                return Err(e.into());
            }
        };

        let pump_handle = tokio::spawn(Self::pump_loop(
            rx,
            cancel.clone(),
            target.clone(),
            Arc::clone(&self.reporter),
            Arc::clone(&self.store),
            self.publisher.clone(),
            self.config.max_in_flight,
        ));

        *handles = Some(SessionHandles {
            cancel,
            target,
            source_handle,
            pump_handle,
        });
        self.set_state(SessionState::Running);
        Ok(true)
    }

    /// Start a session against the target persisted by a previous session.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NoPreviousTarget`] if no usable target was
    /// ever persisted; otherwise errors as [`start`](Self::start).
    pub async fn resume_last(&self) -> Result<bool, ServiceError> {
        let host = self
            .store
            .get(keys::LAST_HOST)?
            .ok_or(ServiceError::NoPreviousTarget)?;
        let port = self
            .store
            .get(keys::LAST_PORT)?
            .and_then(|p| p.parse::<u16>().ok())
            .ok_or(ServiceError::NoPreviousTarget)?;

        let target = ConnectionTarget::new(host, port)?;
        info!(target = %target, "Resuming previous reporting session");
        self.start(target).await
    }

    /// Stop the running session.
    ///
    /// Cancels the source, waits up to the stop grace period for in-flight
    /// deliveries to drain, then records the session-closing outcome.
    /// Idempotent: returns `false` if no session was active.
    pub async fn stop(&self) -> bool {
        let mut handles = self.handles.lock().await;
        let Some(session) = handles.take() else {
            debug!("Stop ignored: no active session");
            return false;
        };

        self.set_state(SessionState::Stopping);
        info!(target = %session.target, "Stopping reporting session");
        session.cancel.cancel();

        let SessionHandles {
            source_handle,
            mut pump_handle,
            ..
        } = session;

        if let Err(e) = source_handle.await {
            warn!(error = %e, "Position source task ended abnormally");
        }

        // The pump drains in-flight deliveries and records the closing
        // outcome itself; past the grace period we abandon them and record
        // it here instead.
        match timeout(self.config.stop_grace, &mut pump_handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Delivery pump ended abnormally"),
            Err(_) => {
                warn!(
                    grace = ?self.config.stop_grace,
                    "In-flight deliveries did not drain within grace period; abandoning"
                );
                pump_handle.abort();
                Self::finish_session(&*self.store, &self.publisher);
            }
        }

        self.set_state(SessionState::Stopped);
        info!("Reporting session stopped");
        true
    }

    fn set_state(&self, state: SessionState) {
        *self.state.write().unwrap() = state;
    }

    /// Receives samples until cancelled, dispatching each into a bounded
    /// delivery task, then drains in-flight deliveries and records the
    /// closing outcome.
    async fn pump_loop(
        mut rx: mpsc::Receiver<PositionSample>,
        cancel: CancellationToken,
        target: ConnectionTarget,
        reporter: Arc<SampleReporter>,
        store: Arc<dyn StateStore>,
        publisher: StatusPublisher,
        max_in_flight: usize,
    ) {
        let slots = Arc::new(Semaphore::new(max_in_flight));
        let mut deliveries = JoinSet::new();

        loop {
            tokio::select! {
                // Cancellation wins over queued samples so nothing is
                // delivered after a stop request.
                biased;

                _ = cancel.cancelled() => break,
                sample = rx.recv() => match sample {
                    Some(sample) => {
                        // Reap finished delivery tasks so the set stays
                        // bounded over a long session.
                        while deliveries.try_join_next().is_some() {}
                        Self::handle_sample(
                            sample,
                            &target,
                            &reporter,
                            &store,
                            &publisher,
                            &slots,
                            &mut deliveries,
                        );
                    }
                    None => break,
                },
            }
        }

        // Each delivery is bounded by its own connect and reply timeouts,
        // so this drain terminates.
        while deliveries.join_next().await.is_some() {}

        Self::finish_session(&*store, &publisher);
    }

    /// Persist and publish one sample, then dispatch its delivery.
    fn handle_sample(
        sample: PositionSample,
        target: &ConnectionTarget,
        reporter: &Arc<SampleReporter>,
        store: &Arc<dyn StateStore>,
        publisher: &StatusPublisher,
        slots: &Arc<Semaphore>,
        deliveries: &mut JoinSet<()>,
    ) {
        debug!(%sample, "Position sample received");
        Self::persist_position(&**store, &sample);
        publisher.publish(StatusEvent::position_updated(&sample));

        match Arc::clone(slots).try_acquire_owned() {
            Ok(permit) => {
                let target = target.clone();
                let reporter = Arc::clone(reporter);
                let store = Arc::clone(store);
                let publisher = publisher.clone();
                deliveries.spawn(async move {
                    let outcome = reporter.report(&sample, &target).await;
                    Self::record_outcome(&*store, &publisher, &outcome);
                    drop(permit);
                });
            }
            Err(_) => {
                warn!("All delivery slots busy; failing sample without queueing");
                let outcome = DeliveryOutcome::failure(CAPACITY_EXHAUSTED);
                Self::record_outcome(&**store, publisher, &outcome);
            }
        }
    }

    fn persist_position(store: &dyn StateStore, sample: &PositionSample) {
        // Store failures must not take down the session; log and move on.
        for (key, value) in [
            (keys::LAST_LATITUDE, sample.latitude.to_string()),
            (keys::LAST_LONGITUDE, sample.longitude.to_string()),
            (keys::LAST_ALTITUDE, sample.altitude.to_string()),
        ] {
            if let Err(e) = store.set(key, &value) {
                warn!(key, error = %e, "Failed to persist position");
            }
        }
    }

    /// Persist and publish one delivery outcome.
    fn record_outcome(store: &dyn StateStore, publisher: &StatusPublisher, outcome: &DeliveryOutcome) {
        if let Err(e) = store.set(keys::LAST_DELIVERY_MESSAGE, &outcome.message) {
            warn!(error = %e, "Failed to persist delivery message");
        }
        if let Err(e) = store.set(keys::LAST_DELIVERY_AT, &outcome.observed_at_formatted()) {
            warn!(error = %e, "Failed to persist delivery timestamp");
        }
        publisher.publish(StatusEvent::delivery_completed(outcome));
    }

    /// Record the outcome that closes a session.
    fn finish_session(store: &dyn StateStore, publisher: &StatusPublisher) {
        let outcome = DeliveryOutcome::stopped();
        Self::record_outcome(store, publisher, &outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{SimulatedPath, SimulatedSource, SourceConfig};
    use crate::reporter::STOPPED_MESSAGE;
    use crate::store::MemoryStateStore;
    use std::time::Duration;

    fn fast_source() -> Arc<SimulatedSource> {
        let config = SourceConfig::default()
            .with_interval(Duration::from_millis(10))
            .with_min_interval(Duration::from_millis(1));
        Arc::new(SimulatedSource::new(config, SimulatedPath::default()))
    }

    fn service_with(source: Arc<SimulatedSource>) -> ReportingService {
        ReportingService::new(
            ServiceConfig::default().with_stop_grace(Duration::from_secs(2)),
            source,
            Arc::new(MemoryStateStore::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_new_service_is_stopped() {
        let service = service_with(fast_source());
        assert_eq!(service.state(), SessionState::Stopped);
        assert!(!service.is_running());
        assert!(!service.device_id().is_empty());
    }

    #[tokio::test]
    async fn test_stop_without_start_is_a_noop() {
        let service = service_with(fast_source());
        assert!(!service.stop().await);
        assert_eq!(service.state(), SessionState::Stopped);
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let service = service_with(fast_source());
        let target = ConnectionTarget::new("127.0.0.1", 1).unwrap();

        assert!(service.start(target.clone()).await.unwrap());
        assert!(service.is_running());
        assert!(!service.start(target).await.unwrap());

        assert!(service.stop().await);
        assert!(!service.stop().await);
        assert_eq!(service.state(), SessionState::Stopped);
    }

    #[tokio::test]
    async fn test_start_persists_target() {
        let store = Arc::new(MemoryStateStore::new());
        let service = ReportingService::new(
            ServiceConfig::default().with_stop_grace(Duration::from_secs(2)),
            fast_source(),
            Arc::clone(&store) as Arc<dyn StateStore>,
        )
        .unwrap();

        let target = ConnectionTarget::new("10.0.2.2", 12345).unwrap();
        service.start(target).await.unwrap();
        service.stop().await;

        assert_eq!(store.get(keys::LAST_HOST).unwrap().as_deref(), Some("10.0.2.2"));
        assert_eq!(store.get(keys::LAST_PORT).unwrap().as_deref(), Some("12345"));
    }

    #[tokio::test]
    async fn test_stop_records_closing_outcome() {
        let store = Arc::new(MemoryStateStore::new());
        let service = ReportingService::new(
            ServiceConfig::default().with_stop_grace(Duration::from_secs(2)),
            fast_source(),
            Arc::clone(&store) as Arc<dyn StateStore>,
        )
        .unwrap();

        let target = ConnectionTarget::new("127.0.0.1", 1).unwrap();
        service.start(target).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        service.stop().await;

        assert_eq!(
            store.get(keys::LAST_DELIVERY_MESSAGE).unwrap().as_deref(),
            Some(STOPPED_MESSAGE)
        );
        assert!(store.get(keys::LAST_DELIVERY_AT).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_denied_source_leaves_service_stopped() {
        let service = ReportingService::new(
            ServiceConfig::default(),
            Arc::new(SimulatedSource::with_access_denied()),
            Arc::new(MemoryStateStore::new()),
        )
        .unwrap();

        let target = ConnectionTarget::new("127.0.0.1", 1).unwrap();
        let err = service.start(target).await.unwrap_err();
        assert!(matches!(err, ServiceError::PermissionDenied(_)));
        assert_eq!(service.state(), SessionState::Stopped);
    }

    #[tokio::test]
    async fn test_resume_without_history_fails() {
        let service = service_with(fast_source());
        let err = service.resume_last().await.unwrap_err();
        assert!(matches!(err, ServiceError::NoPreviousTarget));
    }

    #[tokio::test]
    async fn test_resume_uses_persisted_target() {
        let store = Arc::new(MemoryStateStore::new());
        store.set(keys::LAST_HOST, "127.0.0.1").unwrap();
        store.set(keys::LAST_PORT, "12345").unwrap();

        let service = ReportingService::new(
            ServiceConfig::default().with_stop_grace(Duration::from_secs(2)),
            fast_source(),
            Arc::clone(&store) as Arc<dyn StateStore>,
        )
        .unwrap();

        assert!(service.resume_last().await.unwrap());
        let target = service.target().await.unwrap();
        assert_eq!(target.address(), "127.0.0.1:12345");
        service.stop().await;
    }

    #[tokio::test]
    async fn test_resume_with_garbage_port_fails() {
        let store = Arc::new(MemoryStateStore::new());
        store.set(keys::LAST_HOST, "127.0.0.1").unwrap();
        store.set(keys::LAST_PORT, "not-a-port").unwrap();

        let service = ReportingService::new(
            ServiceConfig::default(),
            fast_source(),
            Arc::clone(&store) as Arc<dyn StateStore>,
        )
        .unwrap();

        assert!(matches!(
            service.resume_last().await.unwrap_err(),
            ServiceError::NoPreviousTarget
        ));
    }
}
