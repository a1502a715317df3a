//! Connection target validation.

use std::fmt;

/// Errors from constructing a [`ConnectionTarget`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// Host must not be empty.
    #[error("Invalid connection target: host must not be empty")]
    EmptyHost,

    /// Port must be in 1..=65535.
    #[error("Invalid connection target: port must be in 1..=65535")]
    InvalidPort,
}

/// The remote listener a reporting session delivers to.
///
/// Validated at construction (non-empty host, non-zero port) and immutable for
/// the lifetime of one session; changing it requires stop + restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    host: String,
    port: u16,
}

impl ConnectionTarget {
    /// Create a validated connection target.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::EmptyHost`] for an empty or whitespace-only
    /// host, and [`TargetError::InvalidPort`] for port 0.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, TargetError> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(TargetError::EmptyHost);
        }
        if port == 0 {
            return Err(TargetError::InvalidPort);
        }
        Ok(Self { host, port })
    }

    /// Get the host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the `host:port` address string for connecting.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_target() {
        let target = ConnectionTarget::new("10.0.2.2", 12345).unwrap();
        assert_eq!(target.host(), "10.0.2.2");
        assert_eq!(target.port(), 12345);
        assert_eq!(target.address(), "10.0.2.2:12345");
    }

    #[test]
    fn test_empty_host_rejected() {
        assert_eq!(
            ConnectionTarget::new("", 12345),
            Err(TargetError::EmptyHost)
        );
        assert_eq!(
            ConnectionTarget::new("   ", 12345),
            Err(TargetError::EmptyHost)
        );
    }

    #[test]
    fn test_zero_port_rejected() {
        assert_eq!(
            ConnectionTarget::new("localhost", 0),
            Err(TargetError::InvalidPort)
        );
    }

    #[test]
    fn test_max_port_accepted() {
        assert!(ConnectionTarget::new("localhost", u16::MAX).is_ok());
    }

    #[test]
    fn test_display() {
        let target = ConnectionTarget::new("tracker.example.com", 9000).unwrap();
        assert_eq!(target.to_string(), "tracker.example.com:9000");
    }
}
