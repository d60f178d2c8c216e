//! # Status Composite Engine
//!
//! Rolls the statuses of many CI jobs up into the single status of a pipeline,
//! a stage or a group of `needs:` dependencies.
//!
//! ## Overview
//!
//! Every job contributes one *effective* status. Jobs that are allowed to fail
//! are folded first: a successful one becomes `success_with_warnings`, a failed
//! or canceled one becomes `ignored`. Only the **set** of effective statuses is
//! kept, so the result never depends on job order or on how many jobs share a
//! status.
//!
//! The set is then matched against an ordered rule list. Several rules can
//! match the same set; the first one wins, and a set no rule matches is
//! `failed`.
//!
//! ```text
//! [success, failed(allow_failure)]  ->  {success, ignored}  ->  success
//! [created, running]                ->  {created, running}  ->  running
//! [skipped, running] (dag)          ->  {skipped, running}  ->  skipped
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use ci_status::status::{CompositeOptions, CoreStatus, JobStatus, StatusComposite};
//!
//! let jobs = vec![
//!     JobStatus::new(CoreStatus::Success),
//!     JobStatus::with_allow_failure(CoreStatus::Success, true),
//! ];
//! let composite = StatusComposite::new(&jobs, CompositeOptions::default());
//!
//! assert_eq!(composite.status(), Some(CoreStatus::Success));
//! assert!(composite.warnings());
//! ```

use super::core_status::CoreStatus;
use crate::constants::status_groups;
use crate::error::StatusResult;
use crate::logging;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

/// A job contributing to an aggregate status
pub trait JobOutcome {
    /// Stored status of the job
    fn status(&self) -> CoreStatus;

    /// Whether the job may fail without failing the aggregate.
    ///
    /// `None` when the caller does not track allow-failure at all.
    fn allow_failure(&self) -> Option<bool> {
        None
    }
}

impl<T: JobOutcome + ?Sized> JobOutcome for &T {
    fn status(&self) -> CoreStatus {
        (**self).status()
    }

    fn allow_failure(&self) -> Option<bool> {
        (**self).allow_failure()
    }
}

impl JobOutcome for CoreStatus {
    fn status(&self) -> CoreStatus {
        *self
    }
}

impl JobOutcome for (CoreStatus, bool) {
    fn status(&self) -> CoreStatus {
        self.0
    }

    fn allow_failure(&self) -> Option<bool> {
        Some(self.1)
    }
}

/// Plain status/allow-failure record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobStatus {
    pub status: CoreStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_failure: Option<bool>,
}

impl JobStatus {
    pub fn new(status: CoreStatus) -> Self {
        Self {
            status,
            allow_failure: None,
        }
    }

    pub fn with_allow_failure(status: CoreStatus, allow_failure: bool) -> Self {
        Self {
            status,
            allow_failure: Some(allow_failure),
        }
    }

    /// Build a record from an untyped status, rejecting unknown values
    pub fn parse(status: &str, allow_failure: Option<bool>) -> StatusResult<Self> {
        Ok(Self {
            status: status.parse()?,
            allow_failure,
        })
    }
}

impl JobOutcome for JobStatus {
    fn status(&self) -> CoreStatus {
        self.status
    }

    fn allow_failure(&self) -> Option<bool> {
        self.allow_failure
    }
}

/// Status of a job after allow-failure folding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectiveStatus {
    Core(CoreStatus),
    /// Successful job that was allowed to fail
    SuccessWithWarnings,
    /// Failed or canceled job that was allowed to fail
    Ignored,
}

impl fmt::Display for EffectiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(status) => write!(f, "{status}"),
            Self::SuccessWithWarnings => write!(f, "success_with_warnings"),
            Self::Ignored => write!(f, "ignored"),
        }
    }
}

impl From<CoreStatus> for EffectiveStatus {
    fn from(status: CoreStatus) -> Self {
        Self::Core(status)
    }
}

/// Opaque reference to the project owning the jobs.
///
/// Carried for logging only; classification never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectRef(pub i64);

/// Flags controlling how jobs are folded and classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOptions {
    /// Fold allowed-to-fail jobs into `success_with_warnings` / `ignored`
    pub with_allow_failure: bool,
    /// Treat the jobs as `needs:` dependencies: any skipped one skips the group
    pub dag: bool,
    pub project: Option<ProjectRef>,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            with_allow_failure: true,
            dag: false,
            project: None,
        }
    }
}

impl CompositeOptions {
    pub fn dag(mut self, dag: bool) -> Self {
        self.dag = dag;
        self
    }

    pub fn with_allow_failure(mut self, with_allow_failure: bool) -> Self {
        self.with_allow_failure = with_allow_failure;
        self
    }

    pub fn project(mut self, project: ProjectRef) -> Self {
        self.project = Some(project);
        self
    }
}

/// Result of a composite classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeStatus {
    /// `None` when no job contributed
    pub status: Option<CoreStatus>,
    pub warnings: bool,
}

#[derive(Debug, Clone, Copy)]
enum RuleCondition {
    /// Every effective status is drawn from the list
    OnlyOf(&'static [EffectiveStatus]),
    /// At least one listed status is present
    AnyOf(&'static [EffectiveStatus]),
}

#[derive(Debug, Clone, Copy)]
struct CompositeRule {
    condition: RuleCondition,
    result: CoreStatus,
}

const SKIPPED: EffectiveStatus = EffectiveStatus::Core(CoreStatus::Skipped);
const SUCCESS: EffectiveStatus = EffectiveStatus::Core(CoreStatus::Success);
const CREATED: EffectiveStatus = EffectiveStatus::Core(CoreStatus::Created);
const PREPARING: EffectiveStatus = EffectiveStatus::Core(CoreStatus::Preparing);
const CANCELED: EffectiveStatus = EffectiveStatus::Core(CoreStatus::Canceled);
const PENDING: EffectiveStatus = EffectiveStatus::Core(CoreStatus::Pending);
const RUNNING: EffectiveStatus = EffectiveStatus::Core(CoreStatus::Running);
const WAITING_FOR_RESOURCE: EffectiveStatus = EffectiveStatus::Core(CoreStatus::WaitingForResource);
const WAITING_FOR_CALLBACK: EffectiveStatus = EffectiveStatus::Core(CoreStatus::WaitingForCallback);
const MANUAL: EffectiveStatus = EffectiveStatus::Core(CoreStatus::Manual);
const SCHEDULED: EffectiveStatus = EffectiveStatus::Core(CoreStatus::Scheduled);
const CANCELING: EffectiveStatus = EffectiveStatus::Core(CoreStatus::Canceling);
const WARNING: EffectiveStatus = EffectiveStatus::SuccessWithWarnings;
const IGNORED: EffectiveStatus = EffectiveStatus::Ignored;

/// Statuses that skip a whole `needs:` group
const DAG_SKIPPING: &[EffectiveStatus] = &[SKIPPED, IGNORED];

/// Classification rules in precedence order. A lone `created` next to other
/// non-terminal work reports `running`.
const RULES: &[CompositeRule] = &[
    CompositeRule {
        condition: RuleCondition::OnlyOf(&[SKIPPED, IGNORED]),
        result: CoreStatus::Skipped,
    },
    CompositeRule {
        condition: RuleCondition::OnlyOf(&[SUCCESS, SKIPPED, WARNING, IGNORED]),
        result: CoreStatus::Success,
    },
    CompositeRule {
        condition: RuleCondition::OnlyOf(&[CREATED, WARNING, IGNORED]),
        result: CoreStatus::Created,
    },
    CompositeRule {
        condition: RuleCondition::OnlyOf(&[PREPARING, WARNING, IGNORED]),
        result: CoreStatus::Preparing,
    },
    CompositeRule {
        condition: RuleCondition::OnlyOf(&[CANCELED, SUCCESS, SKIPPED, WARNING, IGNORED]),
        result: CoreStatus::Canceled,
    },
    CompositeRule {
        condition: RuleCondition::OnlyOf(&[PENDING, CREATED, SKIPPED, WARNING, IGNORED]),
        result: CoreStatus::Pending,
    },
    CompositeRule {
        condition: RuleCondition::AnyOf(&[RUNNING, PENDING]),
        result: CoreStatus::Running,
    },
    CompositeRule {
        condition: RuleCondition::AnyOf(&[WAITING_FOR_RESOURCE]),
        result: CoreStatus::WaitingForResource,
    },
    CompositeRule {
        condition: RuleCondition::AnyOf(&[WAITING_FOR_CALLBACK]),
        result: CoreStatus::WaitingForCallback,
    },
    CompositeRule {
        condition: RuleCondition::AnyOf(&[MANUAL]),
        result: CoreStatus::Manual,
    },
    CompositeRule {
        condition: RuleCondition::AnyOf(&[SCHEDULED]),
        result: CoreStatus::Scheduled,
    },
    CompositeRule {
        condition: RuleCondition::AnyOf(&[PREPARING]),
        result: CoreStatus::Preparing,
    },
    CompositeRule {
        condition: RuleCondition::AnyOf(&[CREATED]),
        result: CoreStatus::Running,
    },
    CompositeRule {
        condition: RuleCondition::AnyOf(&[CANCELING]),
        result: CoreStatus::Canceling,
    },
];

/// Aggregated view over the effective statuses of a set of jobs
#[derive(Debug, Clone)]
pub struct StatusComposite {
    status_set: HashSet<EffectiveStatus>,
    options: CompositeOptions,
}

impl StatusComposite {
    /// Consume the jobs in a single pass
    pub fn new<I>(jobs: I, options: CompositeOptions) -> Self
    where
        I: IntoIterator,
        I::Item: JobOutcome,
    {
        let status_set: HashSet<EffectiveStatus> = jobs
            .into_iter()
            .map(|job| Self::effective_status(&job, options.with_allow_failure))
            .collect();

        debug!(
            project = ?options.project.map(|project| project.0),
            dag = options.dag,
            with_allow_failure = options.with_allow_failure,
            distinct_statuses = status_set.len(),
            "Status composite built"
        );

        Self {
            status_set,
            options,
        }
    }

    /// Consume the jobs with default options (allow-failure on, no DAG)
    pub fn from_jobs<I>(jobs: I) -> Self
    where
        I: IntoIterator,
        I::Item: JobOutcome,
    {
        Self::new(jobs, CompositeOptions::default())
    }

    fn effective_status<J: JobOutcome>(job: &J, with_allow_failure: bool) -> EffectiveStatus {
        let status = job.status();
        let allowed_to_fail = with_allow_failure && job.allow_failure().unwrap_or(false);

        if allowed_to_fail && status_groups::PASSED_WITH_WARNINGS_STATUSES.contains(&status) {
            EffectiveStatus::SuccessWithWarnings
        } else if allowed_to_fail && status_groups::IGNORED_STATUSES.contains(&status) {
            EffectiveStatus::Ignored
        } else {
            EffectiveStatus::Core(status)
        }
    }

    /// Aggregate status, `None` when no job contributed
    pub fn status(&self) -> Option<CoreStatus> {
        if self.is_empty() {
            return None;
        }

        if self.options.dag && self.any_of(DAG_SKIPPING) {
            trace!("DAG dependency skipped or ignored");
            return Some(CoreStatus::Skipped);
        }

        let status = RULES
            .iter()
            .enumerate()
            .find(|(_, rule)| self.matches(rule.condition))
            .map(|(index, rule)| {
                trace!(rule = index, result = %rule.result, "Composite rule matched");
                rule.result
            })
            .unwrap_or(CoreStatus::Failed);

        Some(status)
    }

    /// True when at least one allowed-to-fail job succeeded
    pub fn warnings(&self) -> bool {
        self.status_set.contains(&EffectiveStatus::SuccessWithWarnings)
    }

    pub fn is_empty(&self) -> bool {
        self.status_set.is_empty()
    }

    pub fn options(&self) -> CompositeOptions {
        self.options
    }

    /// Effective statuses present, sorted for stable output
    pub fn effective_statuses(&self) -> Vec<EffectiveStatus> {
        let mut statuses: Vec<EffectiveStatus> = self.status_set.iter().copied().collect();
        statuses.sort();
        statuses
    }

    pub fn result(&self) -> CompositeStatus {
        let result = CompositeStatus {
            status: self.status(),
            warnings: self.warnings(),
        };
        logging::log_composite_evaluation(
            self.options.project.map(|project| project.0),
            self.options.dag,
            self.status_set.len(),
            result.status,
            result.warnings,
        );
        result
    }

    fn matches(&self, condition: RuleCondition) -> bool {
        match condition {
            RuleCondition::OnlyOf(names) => self.only_of(names),
            RuleCondition::AnyOf(names) => self.any_of(names),
        }
    }

    fn any_of(&self, names: &[EffectiveStatus]) -> bool {
        names.iter().any(|name| self.status_set.contains(name))
    }

    fn only_of(&self, names: &[EffectiveStatus]) -> bool {
        !self.status_set.is_empty() && self.status_set.iter().all(|status| names.contains(status))
    }
}
