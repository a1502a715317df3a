//! Session lifecycle states.

use std::fmt;

/// Lifecycle state of the reporting session.
///
/// Transitions are `Stopped -> Starting -> Running -> Stopping -> Stopped`.
/// A failed start falls back from `Starting` to `Stopped`. The state is
/// queryable at any time without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session active; the initial and final state.
    #[default]
    Stopped,
    /// Start requested; acquiring the position source.
    Starting,
    /// Sampling and delivering.
    Running,
    /// Stop requested; draining in-flight deliveries.
    Stopping,
}

impl SessionState {
    /// Whether the session is running (sampling and delivering).
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
        };
        write!(f, "{}", s)
    }
}
