//! Service error types.

use std::fmt;

use crate::position::PositionSourceError;
use crate::reporter::TargetError;
use crate::store::StoreError;

/// Errors that can occur during service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// The position source refused access.
    PermissionDenied(String),
    /// The position source failed to start.
    SourceError(PositionSourceError),
    /// The connection target is not valid.
    InvalidTarget(TargetError),
    /// The state store failed.
    StoreError(StoreError),
    /// No previous target is persisted to resume from.
    NoPreviousTarget,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied(msg) => write!(f, "Position access denied: {}", msg),
            Self::SourceError(e) => write!(f, "Position source error: {}", e),
            Self::InvalidTarget(e) => write!(f, "Invalid connection target: {}", e),
            Self::StoreError(e) => write!(f, "State store error: {}", e),
            Self::NoPreviousTarget => write!(f, "No previous connection target to resume"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceError(e) => Some(e),
            Self::InvalidTarget(e) => Some(e),
            Self::StoreError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PositionSourceError> for ServiceError {
    fn from(e: PositionSourceError) -> Self {
        match e {
            PositionSourceError::PermissionDenied(msg) => Self::PermissionDenied(msg),
            other => Self::SourceError(other),
        }
    }
}

impl From<TargetError> for ServiceError {
    fn from(e: TargetError) -> Self {
        Self::InvalidTarget(e)
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        Self::StoreError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_permission_denied() {
        let err = ServiceError::PermissionDenied("location access revoked".to_string());
        assert!(err.to_string().contains("Position access denied"));
        assert!(err.to_string().contains("location access revoked"));
    }

    #[test]
    fn test_from_source_error_maps_permission() {
        let err: ServiceError =
            PositionSourceError::PermissionDenied("revoked".to_string()).into();
        assert!(matches!(err, ServiceError::PermissionDenied(_)));
    }

    #[test]
    fn test_from_source_error_maps_start_failure() {
        let err: ServiceError = PositionSourceError::StartFailed("no provider".to_string()).into();
        assert!(matches!(err, ServiceError::SourceError(_)));
    }

    #[test]
    fn test_from_target_error() {
        let err: ServiceError = TargetError::InvalidPort.into();
        assert!(matches!(err, ServiceError::InvalidTarget(_)));
        assert!(err.to_string().contains("Invalid connection target"));
    }

    #[test]
    fn test_error_trait() {
        let err = ServiceError::NoPreviousTarget;
        let _: &dyn std::error::Error = &err;
    }
}
