//! Shared fixtures and proptest strategies for integration tests

#![allow(dead_code)]

pub mod strategies;

use chrono::{DateTime, Utc};
use ci_status::status::presets::{Ability, Permissions, StatusCapabilities};
use ci_status::status::StatusSubject;

/// Subject whose every capability is set by the test
#[derive(Debug, Clone, Default)]
pub struct TestSubject {
    pub status: Option<String>,
    pub warnings: bool,
    pub allows_failure: bool,
    pub retryable: bool,
    pub cancelable: bool,
    pub playable: bool,
    pub stops_environment: bool,
    pub retried: bool,
    pub erased: bool,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub failure_reason: Option<String>,
    pub confirmation_message: Option<String>,
    pub resource_group: Option<String>,
    pub path: Option<String>,
}

impl TestSubject {
    pub fn new(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            ..Self::default()
        }
    }

    /// Subject exposed at a typical job page
    pub fn job(status: &str) -> Self {
        Self {
            path: Some("/acme/widgets/-/jobs/42".to_string()),
            ..Self::new(status)
        }
    }
}

impl StatusSubject for TestSubject {
    fn raw_status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl StatusCapabilities for TestSubject {
    fn has_warnings(&self) -> bool {
        self.warnings
    }

    fn allows_failure(&self) -> bool {
        self.allows_failure
    }

    fn is_retryable(&self) -> bool {
        self.retryable
    }

    fn is_cancelable(&self) -> bool {
        self.cancelable
    }

    fn is_playable(&self) -> bool {
        self.playable
    }

    fn stops_environment(&self) -> bool {
        self.stops_environment
    }

    fn is_retried(&self) -> bool {
        self.retried
    }

    fn is_erased(&self) -> bool {
        self.erased
    }

    fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at
    }

    fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    fn manual_confirmation_message(&self) -> Option<&str> {
        self.confirmation_message.as_deref()
    }

    fn resource_group(&self) -> Option<&str> {
        self.resource_group.as_deref()
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// Viewer holding a fixed set of abilities
#[derive(Debug, Clone, Default)]
pub struct TestViewer {
    pub abilities: Vec<Ability>,
}

impl TestViewer {
    pub fn maintainer() -> Self {
        Self {
            abilities: vec![
                Ability::ReadPipeline,
                Ability::ReadBuild,
                Ability::UpdateBuild,
                Ability::CancelBuild,
                Ability::PlayJob,
            ],
        }
    }

    pub fn reporter() -> Self {
        Self {
            abilities: vec![Ability::ReadPipeline, Ability::ReadBuild],
        }
    }

    pub fn guest() -> Self {
        Self::default()
    }
}

impl Permissions for TestViewer {
    fn can(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }
}
