//! # Status Constants
//!
//! Status groupings shared by the composite engine, the decoration factory and
//! the built-in extended statuses.

pub use crate::status::CoreStatus;

/// Status reported for a subject that has none stored yet
pub const DEFAULT_STATUS: CoreStatus = CoreStatus::Created;

/// Status groupings for classification logic
pub mod status_groups {
    use super::CoreStatus;

    /// Statuses that count as "passed with warnings" when the job may fail
    pub const PASSED_WITH_WARNINGS_STATUSES: &[CoreStatus] = &[CoreStatus::Success];

    /// Statuses that are ignored when the job may fail
    pub const IGNORED_STATUSES: &[CoreStatus] = &[CoreStatus::Failed, CoreStatus::Canceled];

    /// Statuses holding a job before it can run
    pub const BLOCKED_STATUSES: &[CoreStatus] = &[CoreStatus::Manual, CoreStatus::Scheduled];

    /// Statuses of queued or executing jobs
    pub const ACTIVE_STATUSES: &[CoreStatus] = &[
        CoreStatus::WaitingForCallback,
        CoreStatus::Preparing,
        CoreStatus::Pending,
        CoreStatus::Running,
    ];

    /// Terminal statuses
    pub const COMPLETED_STATUSES: &[CoreStatus] = &[
        CoreStatus::Success,
        CoreStatus::Failed,
        CoreStatus::Canceled,
        CoreStatus::Skipped,
    ];

    /// Statuses in which nothing runs until an external event happens
    pub const STOPPED_STATUSES: &[CoreStatus] = &[
        CoreStatus::Success,
        CoreStatus::Failed,
        CoreStatus::Canceled,
        CoreStatus::Skipped,
        CoreStatus::Manual,
        CoreStatus::Scheduled,
    ];

    /// Statuses a cancel request applies to
    pub const CANCELABLE_STATUSES: &[CoreStatus] = &[
        CoreStatus::Running,
        CoreStatus::WaitingForResource,
        CoreStatus::WaitingForCallback,
        CoreStatus::Preparing,
        CoreStatus::Pending,
        CoreStatus::Created,
        CoreStatus::Scheduled,
    ];
}

#[cfg(test)]
mod tests {
    use super::status_groups::*;
    use super::*;

    #[test]
    fn test_stopped_is_completed_plus_blocked() {
        let mut expected: Vec<CoreStatus> = COMPLETED_STATUSES
            .iter()
            .chain(BLOCKED_STATUSES)
            .copied()
            .collect();
        let mut stopped = STOPPED_STATUSES.to_vec();
        expected.sort();
        stopped.sort();
        assert_eq!(stopped, expected);
    }

    #[test]
    fn test_allow_failure_groups_are_disjoint() {
        for status in PASSED_WITH_WARNINGS_STATUSES {
            assert!(!IGNORED_STATUSES.contains(status));
        }
    }

    #[test]
    fn test_default_status() {
        assert_eq!(DEFAULT_STATUS, CoreStatus::Created);
    }
}
