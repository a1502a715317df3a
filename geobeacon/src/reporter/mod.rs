//! Sample Reporter - per-sample delivery over TCP.
//!
//! Each delivery is a fresh connect-send-read-close cycle against the
//! configured [`ConnectionTarget`]: there is no connection pooling and no
//! automatic retry. A failed delivery is converted into a failed
//! [`DeliveryOutcome`]; retry, if any, is driven only by the next scheduled
//! sample.
//!
//! # Reply Policy
//!
//! The remote is expected to reply with at most one line before the reporter
//! closes the connection. An empty line, or a close before any byte arrives,
//! counts as success with a synthesized "sent successfully" message; remotes
//! are allowed to accept silently. A read that exceeds the bounded wait is a
//! failure.

mod outcome;
mod record;
mod target;

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::position::PositionSample;

pub use outcome::{DeliveryOutcome, SENT_SUCCESSFULLY, STOPPED_MESSAGE};
pub use record::{DeliveryRecord, ANDROID_MARKER};
pub use target::{ConnectionTarget, TargetError};

/// Timeouts for one delivery attempt.
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Bound on establishing the TCP connection.
    pub connect_timeout: Duration,

    /// Bound on waiting for the remote's reply line.
    pub reply_timeout: Duration,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            reply_timeout: Duration::from_secs(5),
        }
    }
}

/// Error type for a single delivery attempt.
///
/// All variants are non-fatal to the reporting loop: they are converted to a
/// failed [`DeliveryOutcome`] at the delivery-task boundary and the loop
/// continues with the next sample.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// TCP connect failed.
    #[error("connect to {target} failed: {source}")]
    ConnectFailed {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// TCP connect did not complete within the bound.
    #[error("connect to {target} timed out after {timeout:?}")]
    ConnectTimeout { target: String, timeout: Duration },

    /// Writing the record failed.
    #[error("write to {target} failed: {source}")]
    WriteFailed {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the reply failed.
    #[error("read from {target} failed: {source}")]
    ReadFailed {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The remote did not reply within the bound.
    #[error("no reply from {target} within {timeout:?}")]
    ReadTimeout { target: String, timeout: Duration },

    /// Serializing the record failed.
    #[error("encoding delivery record failed: {0}")]
    EncodeFailed(#[from] serde_json::Error),
}

/// Delivers position samples to a remote listener, one connection per sample.
pub struct SampleReporter {
    config: ReporterConfig,
    device_id: String,
}

impl SampleReporter {
    /// Create a reporter for the given device identifier.
    pub fn new(config: ReporterConfig, device_id: impl Into<String>) -> Self {
        Self {
            config,
            device_id: device_id.into(),
        }
    }

    /// Get the device identifier stamped into each record.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Deliver one sample to the target and capture the outcome.
    ///
    /// Never returns an error: connect/write/read failures become a failed
    /// [`DeliveryOutcome`] with a human-readable diagnostic. The connection is
    /// closed on every exit path.
    pub async fn report(
        &self,
        sample: &PositionSample,
        target: &ConnectionTarget,
    ) -> DeliveryOutcome {
        match self.try_report(sample, target).await {
            Ok(message) => {
                debug!(target = %target, reply = %message, "Delivery succeeded");
                DeliveryOutcome::success(message)
            }
            Err(e) => {
                warn!(target = %target, error = %e, "Delivery failed");
                DeliveryOutcome::failure(e.to_string())
            }
        }
    }

    async fn try_report(
        &self,
        sample: &PositionSample,
        target: &ConnectionTarget,
    ) -> Result<String, ReportError> {
        let record = DeliveryRecord::new(sample, &self.device_id);
        let line = record.to_wire_line()?;
        let address = target.address();

        // Fresh connection per sample; dropped (and thereby closed) on every
        // exit path below.
        let stream = tokio::time::timeout(self.config.connect_timeout, TcpStream::connect(&address))
            .await
            .map_err(|_| ReportError::ConnectTimeout {
                target: address.clone(),
                timeout: self.config.connect_timeout,
            })?
            .map_err(|e| ReportError::ConnectFailed {
                target: address.clone(),
                source: e,
            })?;

        let (read_half, mut write_half) = stream.into_split();

        write_half
            .write_all(line.as_bytes())
            .await
            .map_err(|e| ReportError::WriteFailed {
                target: address.clone(),
                source: e,
            })?;
        write_half
            .flush()
            .await
            .map_err(|e| ReportError::WriteFailed {
                target: address.clone(),
                source: e,
            })?;

        let mut reader = BufReader::new(read_half);
        let mut reply = String::new();
        match tokio::time::timeout(self.config.reply_timeout, reader.read_line(&mut reply)).await {
            Err(_) => Err(ReportError::ReadTimeout {
                target: address,
                timeout: self.config.reply_timeout,
            }),
            Ok(Err(e)) => Err(ReportError::ReadFailed {
                target: address,
                source: e,
            }),
            Ok(Ok(_)) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    // No bytes before close, or a bare newline: the remote
                    // accepted silently.
                    Ok(SENT_SUCCESSFULLY.to_string())
                } else {
                    Ok(reply.to_string())
                }
            }
        }
    }
}
