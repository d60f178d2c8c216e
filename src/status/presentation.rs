//! Static display attributes of every core status.

use super::core_status::CoreStatus;

/// Display attributes fixed by a core status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorePresentation {
    pub text: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub favicon: &'static str,
    /// Never link to a details page, whatever the helpers say
    pub suppresses_details: bool,
}

impl CorePresentation {
    const fn new(
        text: &'static str,
        label: &'static str,
        icon: &'static str,
        favicon: &'static str,
    ) -> Self {
        Self {
            text,
            label,
            icon,
            favicon,
            suppresses_details: false,
        }
    }

    const fn without_details(self) -> Self {
        Self {
            suppresses_details: true,
            ..self
        }
    }
}

impl CoreStatus {
    pub fn presentation(&self) -> CorePresentation {
        match self {
            Self::Created => CorePresentation::new(
                "created",
                "created",
                "status_created",
                "favicon_status_created",
            ),
            Self::WaitingForResource => CorePresentation::new(
                "waiting",
                "waiting for resource",
                "status_pending",
                "favicon_status_pending",
            )
            .without_details(),
            Self::Preparing => CorePresentation::new(
                "preparing",
                "preparing",
                "status_preparing",
                "favicon_status_preparing",
            ),
            Self::WaitingForCallback => CorePresentation::new(
                "waiting",
                "waiting for callback",
                "status_pending",
                "favicon_status_pending",
            )
            .without_details(),
            Self::Pending => CorePresentation::new(
                "pending",
                "pending",
                "status_pending",
                "favicon_status_pending",
            ),
            Self::Running => CorePresentation::new(
                "running",
                "running",
                "status_running",
                "favicon_status_running",
            ),
            Self::Success => CorePresentation::new(
                "passed",
                "passed",
                "status_success",
                "favicon_status_success",
            ),
            Self::Failed => {
                CorePresentation::new("failed", "failed", "status_failed", "favicon_status_failed")
            }
            Self::Canceling => CorePresentation::new(
                "canceling",
                "canceling",
                "status_canceled",
                "favicon_status_canceled",
            )
            .without_details(),
            Self::Canceled => CorePresentation::new(
                "canceled",
                "canceled",
                "status_canceled",
                "favicon_status_canceled",
            ),
            Self::Skipped => CorePresentation::new(
                "skipped",
                "skipped",
                "status_skipped",
                "favicon_status_skipped",
            ),
            Self::Manual => CorePresentation::new(
                "manual",
                "manual action",
                "status_manual",
                "favicon_status_manual",
            ),
            Self::Scheduled => CorePresentation::new(
                "scheduled",
                "scheduled",
                "status_scheduled",
                "favicon_status_scheduled",
            ),
        }
    }

    /// Machine name used for styling, the snake-case status name
    pub fn group(&self) -> &'static str {
        self.as_str()
    }
}
