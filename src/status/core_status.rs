use crate::constants::{status_groups, DEFAULT_STATUS};
use crate::error::StatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored status of a CI job, stage or pipeline.
///
/// The enumeration is closed: an unknown raw status is a parse error, never a
/// silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreStatus {
    /// Job exists but has not been queued yet
    Created,
    /// Job is waiting for a resource group slot
    WaitingForResource,
    /// Runner is preparing the job environment
    Preparing,
    /// Job is waiting for an external callback
    WaitingForCallback,
    /// Job is queued for a runner
    Pending,
    /// Job is executing
    Running,
    /// Job finished successfully
    Success,
    /// Job finished with an error
    Failed,
    /// Cancellation was requested and is in progress
    Canceling,
    /// Job was canceled
    Canceled,
    /// Job never ran
    Skipped,
    /// Job waits for a manual action
    Manual,
    /// Job is delayed until a scheduled time
    Scheduled,
}

impl CoreStatus {
    /// Every status, in declaration order.
    pub const ALL: [CoreStatus; 13] = [
        Self::Created,
        Self::WaitingForResource,
        Self::Preparing,
        Self::WaitingForCallback,
        Self::Pending,
        Self::Running,
        Self::Success,
        Self::Failed,
        Self::Canceling,
        Self::Canceled,
        Self::Skipped,
        Self::Manual,
        Self::Scheduled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::WaitingForResource => "waiting_for_resource",
            Self::Preparing => "preparing",
            Self::WaitingForCallback => "waiting_for_callback",
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Canceling => "canceling",
            Self::Canceled => "canceled",
            Self::Skipped => "skipped",
            Self::Manual => "manual",
            Self::Scheduled => "scheduled",
        }
    }

    /// Check if the job is queued or executing
    pub fn is_active(&self) -> bool {
        status_groups::ACTIVE_STATUSES.contains(self)
    }

    /// Check if this is a terminal state (no further transitions expected)
    pub fn is_complete(&self) -> bool {
        status_groups::COMPLETED_STATUSES.contains(self)
    }

    /// Alias of [`CoreStatus::is_complete`] matching the state machine vocabulary
    pub fn is_terminal(&self) -> bool {
        self.is_complete()
    }

    /// Check if the job is held before running
    pub fn is_blocked(&self) -> bool {
        status_groups::BLOCKED_STATUSES.contains(self)
    }

    /// Check if nothing will happen without an external event
    pub fn is_stopped(&self) -> bool {
        status_groups::STOPPED_STATUSES.contains(self)
    }

    /// Check if a cancel request makes sense in this state
    pub fn is_cancelable(&self) -> bool {
        status_groups::CANCELABLE_STATUSES.contains(self)
    }
}

impl Default for CoreStatus {
    fn default() -> Self {
        DEFAULT_STATUS
    }
}

impl fmt::Display for CoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CoreStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StatusError::invalid_status(s))
    }
}
