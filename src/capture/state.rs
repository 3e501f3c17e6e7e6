/// Run state definitions for the capture executor
///
/// A run moves from `Idle` to `Running` once the first job starts, and ends
/// in exactly one terminal state.
use std::fmt;

/// Represents the current state of a capture run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// No job has started yet
    Idle,

    /// Jobs are being processed
    Running,

    // ===== Terminal States =====
    /// Every planned job was attempted
    Completed,

    /// The run stopped because the capture limit was reached
    LimitReached,

    /// The operator declined to continue after a failure
    Aborted,
}

impl RunState {
    /// Returns true if the run has ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::LimitReached | Self::Aborted)
    }

    /// Returns true for both flavours of normal completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed | Self::LimitReached)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::LimitReached => "limit_reached",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
