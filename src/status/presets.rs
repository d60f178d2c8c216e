//! # Built-in Extended Statuses
//!
//! Ready-made extended statuses and factories for the three kinds of subject
//! the CI pages show: pipelines, stages and builds (jobs).
//!
//! Subjects describe themselves through [`StatusCapabilities`]; viewers answer
//! permission checks through [`Permissions`]. Both traits default every answer
//! to "no", so an implementation only spells out what it supports.
//!
//! ```rust
//! use ci_status::status::presets::{stage_factory, Ability, Permissions, StatusCapabilities};
//! use ci_status::status::StatusSubject;
//!
//! struct Stage;
//!
//! impl StatusSubject for Stage {
//!     fn raw_status(&self) -> Option<&str> {
//!         Some("success")
//!     }
//! }
//!
//! impl StatusCapabilities for Stage {
//!     fn has_warnings(&self) -> bool {
//!         true
//!     }
//! }
//!
//! struct Guest;
//!
//! impl Permissions for Guest {
//!     fn can(&self, _ability: Ability) -> bool {
//!         false
//!     }
//! }
//!
//! let status = stage_factory::<Stage, Guest>(&Stage, None).fabricate().unwrap();
//! assert_eq!(status.group(), "success-with-warnings");
//! assert_eq!(status.status_tooltip(), "passed");
//! ```

use super::core_status::CoreStatus;
use super::descriptor::{Illustration, StatusAction, StatusOverride};
use super::extended::{CommonHelpers, ExtendedCandidate, ExtendedGroup, StatusSubject};
use super::factory::StatusFactory;
use crate::constants::DEFAULT_STATUS;
use crate::error::StatusResult;
use chrono::{DateTime, Utc};

const PENDING_IMAGE: &str = "illustrations/empty-state/empty-job-pending-md.svg";
const SKIPPED_IMAGE: &str = "illustrations/empty-state/empty-job-skipped-md.svg";

/// Permission a viewer may hold on a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    ReadPipeline,
    ReadBuild,
    UpdateBuild,
    CancelBuild,
    PlayJob,
}

/// Permission checks of the user looking at a status
pub trait Permissions {
    fn can(&self, ability: Ability) -> bool;
}

/// What a subject supports beyond its stored status
pub trait StatusCapabilities: StatusSubject {
    /// Some allowed-to-fail job failed
    fn has_warnings(&self) -> bool {
        false
    }

    fn allows_failure(&self) -> bool {
        false
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn is_cancelable(&self) -> bool {
        false
    }

    /// Manual job that can be started now
    fn is_playable(&self) -> bool {
        false
    }

    /// Playing the job stops an environment
    fn stops_environment(&self) -> bool {
        false
    }

    /// A newer attempt of this job exists
    fn is_retried(&self) -> bool {
        false
    }

    /// Trace and artifacts of the job were erased
    fn is_erased(&self) -> bool {
        false
    }

    fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn failure_reason(&self) -> Option<&str> {
        None
    }

    /// Prompt shown before a manual job is started
    fn manual_confirmation_message(&self) -> Option<&str> {
        None
    }

    /// Resource group the job waits on
    fn resource_group(&self) -> Option<&str> {
        None
    }

    /// Details page of the subject
    fn path(&self) -> Option<&str> {
        None
    }
}

impl<T: StatusCapabilities + ?Sized> StatusCapabilities for &T {
    fn has_warnings(&self) -> bool {
        (**self).has_warnings()
    }

    fn allows_failure(&self) -> bool {
        (**self).allows_failure()
    }

    fn is_retryable(&self) -> bool {
        (**self).is_retryable()
    }

    fn is_cancelable(&self) -> bool {
        (**self).is_cancelable()
    }

    fn is_playable(&self) -> bool {
        (**self).is_playable()
    }

    fn stops_environment(&self) -> bool {
        (**self).stops_environment()
    }

    fn is_retried(&self) -> bool {
        (**self).is_retried()
    }

    fn is_erased(&self) -> bool {
        (**self).is_erased()
    }

    fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        (**self).scheduled_at()
    }

    fn failure_reason(&self) -> Option<&str> {
        (**self).failure_reason()
    }

    fn manual_confirmation_message(&self) -> Option<&str> {
        (**self).manual_confirmation_message()
    }

    fn resource_group(&self) -> Option<&str> {
        (**self).resource_group()
    }

    fn path(&self) -> Option<&str> {
        (**self).path()
    }
}

fn current_status<S: StatusSubject + ?Sized>(subject: &S) -> StatusResult<CoreStatus> {
    subject.raw_status().unwrap_or(DEFAULT_STATUS.as_str()).parse()
}

fn viewer_can<V: Permissions + ?Sized>(viewer: Option<&V>, ability: Ability) -> bool {
    viewer.is_some_and(|viewer| viewer.can(ability))
}

/// POST action on a sub-path of the subject, when the viewer may use it
fn subject_action<S, V>(
    subject: &S,
    viewer: Option<&V>,
    ability: Ability,
    icon: &str,
    title: &str,
    suffix: &str,
) -> Option<StatusAction>
where
    S: StatusCapabilities + ?Sized,
    V: Permissions + ?Sized,
{
    if !viewer_can(viewer, ability) {
        return None;
    }
    subject
        .path()
        .map(|path| StatusAction::post(icon, title, format!("{path}/{suffix}")))
}

fn with_action(overrides: StatusOverride, action: Option<StatusAction>) -> StatusOverride {
    match action {
        Some(action) => overrides.action(action),
        None => overrides,
    }
}

/// Human readable description of a job failure reason
pub fn failure_reason_description(reason: &str) -> String {
    match reason {
        "unknown_failure" => "unknown failure".to_string(),
        "script_failure" => "script failure".to_string(),
        "api_failure" => "API failure".to_string(),
        "stuck_or_timeout_failure" => "stuck or timeout failure".to_string(),
        "runner_system_failure" => "runner system failure".to_string(),
        "missing_dependency_failure" => "missing dependency failure".to_string(),
        "runner_unsupported" => "unsupported runner".to_string(),
        "job_execution_timeout" => "job execution timeout".to_string(),
        "unmet_prerequisites" => "unmet prerequisites".to_string(),
        other => other.replace('_', " "),
    }
}

/// Remaining time before a delayed job starts, as `HH:MM:SS`
pub fn execute_in(scheduled_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = (scheduled_at - now).num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        remaining / 3600,
        (remaining % 3600) / 60,
        remaining % 60
    )
}

/// Illustration of a job that has no trace to show
pub fn no_trace_illustration() -> Illustration {
    Illustration::new(SKIPPED_IMAGE, "This job does not have a trace.")
}

/// Successful subject that has allowed-to-fail failures
pub fn success_warning<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    ExtendedCandidate::new(
        "success_warning",
        |subject: &S, _| {
            Ok(current_status(subject)? == CoreStatus::Success && subject.has_warnings())
        },
        |_, _, _| {
            StatusOverride::new()
                .label("passed with warnings")
                .icon("status_warning")
                .group("success-with-warnings")
        },
    )
}

/// Pipeline waiting for a delayed job
pub fn pipeline_delayed<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    ExtendedCandidate::new(
        "pipeline_delayed",
        |subject: &S, _| Ok(current_status(subject)? == CoreStatus::Scheduled),
        |_, _, _| {
            StatusOverride::new()
                .text("delayed")
                .label("waiting for delayed job")
        },
    )
}

/// Pipeline waiting for a manual action
pub fn pipeline_blocked<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    ExtendedCandidate::new(
        "pipeline_blocked",
        |subject: &S, _| Ok(current_status(subject)? == CoreStatus::Manual),
        |_, _, _| {
            StatusOverride::new()
                .text("blocked")
                .label("waiting for manual action")
        },
    )
}

/// Job whose stored status selects an empty-state illustration
fn illustrated<S, V>(
    name: &'static str,
    status: CoreStatus,
    illustration: fn(&S) -> Illustration,
) -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    ExtendedCandidate::new(
        name,
        move |subject: &S, _| Ok(current_status(subject)? == status),
        move |subject: &S, _, _| StatusOverride::new().illustration(illustration(subject)),
    )
}

/// Job whose trace was erased
pub fn build_erased<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    ExtendedCandidate::when(
        "build_erased",
        |subject: &S, _| subject.is_erased(),
        |_, _, _| {
            let illustration = Illustration::new(SKIPPED_IMAGE, "Job has been erased");
            StatusOverride::new().illustration(illustration)
        },
    )
}

/// Delayed manual job, with the remaining time in its tooltip
pub fn build_scheduled<S, V>(now: DateTime<Utc>) -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    ExtendedCandidate::new(
        "build_scheduled",
        |subject: &S, _| {
            Ok(current_status(subject)? == CoreStatus::Scheduled
                && subject.scheduled_at().is_some())
        },
        move |subject: &S, _, _| match subject.scheduled_at() {
            Some(scheduled_at) => {
                let remaining = execute_in(scheduled_at, now);
                let illustration = Illustration::new(
                    "illustrations/empty-state/empty-scheduled-md.svg",
                    format!("This is a delayed job to run in {remaining}"),
                )
                .with_content(
                    "This job will automatically run after its timer finishes. \
                     Often they are used for incremental roll-out deploys to production \
                     environments. When unscheduled it converts into a manual action.",
                );
                StatusOverride::new()
                    .tooltip(format!("delayed manual action ({remaining})"))
                    .illustration(illustration)
            }
            None => StatusOverride::new(),
        },
    )
}

/// Manual job waiting to be started
pub fn build_manual<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    ExtendedCandidate::when(
        "build_manual",
        |subject: &S, _| subject.is_playable(),
        |_, _, _| {
            let illustration = Illustration::new(
                "illustrations/empty-state/empty-job-manual-md.svg",
                "This job requires a manual action",
            )
            .with_content(
                "This job depends on a user to trigger its process. \
                 Often they are used to deploy code to production environments",
            );
            StatusOverride::new().illustration(illustration)
        },
    )
}

pub fn build_canceled<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    illustrated("build_canceled", CoreStatus::Canceled, |_| {
        Illustration::new(
            "illustrations/empty-state/empty-job-canceled-md.svg",
            "This job has been canceled",
        )
    })
}

pub fn build_created<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    illustrated("build_created", CoreStatus::Created, |_| {
        Illustration::new(
            "illustrations/empty-state/empty-job-not-triggered-md.svg",
            "This job has not been triggered yet",
        )
        .with_content(
            "This job depends on upstream jobs that need to succeed \
             in order for this job to be triggered",
        )
    })
}

/// Job blocked on its resource group
pub fn build_waiting_for_resource<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    illustrated(
        "build_waiting_for_resource",
        CoreStatus::WaitingForResource,
        |subject| {
            let title = match subject.resource_group() {
                Some(resource) => format!("This job is waiting for resource: {resource}"),
                None => "This job is waiting for resource".to_string(),
            };
            Illustration::new(PENDING_IMAGE, title)
        },
    )
}

pub fn build_preparing<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    illustrated("build_preparing", CoreStatus::Preparing, |_| {
        Illustration::new(PENDING_IMAGE, "This job is preparing to start")
            .with_content("This job is performing tasks that must complete before it can start")
    })
}

pub fn build_pending<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    illustrated("build_pending", CoreStatus::Pending, |_| {
        Illustration::new(PENDING_IMAGE, "This job has not started yet")
            .with_content("This job is in pending state and is waiting to be picked by a runner")
    })
}

pub fn build_skipped<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    illustrated("build_skipped", CoreStatus::Skipped, |_| {
        Illustration::new(SKIPPED_IMAGE, "This job has been skipped")
    })
}

pub fn build_cancelable<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    ExtendedCandidate::when(
        "build_cancelable",
        |subject: &S, _| subject.is_cancelable(),
        |subject: &S, viewer: Option<&V>, _| {
            let action =
                subject_action(subject, viewer, Ability::CancelBuild, "cancel", "Cancel", "cancel")
                    .map(|action| action.with_button_title("Cancel this job"));
            with_action(StatusOverride::new(), action)
        },
    )
}

pub fn build_retryable<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    ExtendedCandidate::when(
        "build_retryable",
        |subject: &S, _| subject.is_retryable(),
        |subject: &S, viewer: Option<&V>, _| {
            let action =
                subject_action(subject, viewer, Ability::UpdateBuild, "retry", "Retry", "retry")
                    .map(|action| action.with_button_title("Retry this job"));
            with_action(StatusOverride::new(), action)
        },
    )
}

/// Failed job, with the failure reason appended to its tooltip
pub fn build_failed<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    ExtendedCandidate::new(
        "build_failed",
        |subject: &S, _| Ok(current_status(subject)? == CoreStatus::Failed),
        |subject: &S, _, wrapped| match subject.failure_reason() {
            Some(reason) => StatusOverride::new().tooltip(format!(
                "{} - ({})",
                wrapped.status_tooltip(),
                failure_reason_description(reason)
            )),
            None => StatusOverride::new(),
        },
    )
}

/// Failed job that was allowed to fail
pub fn build_failed_allowed<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    ExtendedCandidate::new(
        "build_failed_allowed",
        |subject: &S, _| {
            Ok(current_status(subject)? == CoreStatus::Failed && subject.allows_failure())
        },
        |_, _, wrapped| {
            StatusOverride::new()
                .label("failed (allowed to fail)")
                .icon("status_warning")
                .group("failed-with-warnings")
                .tooltip(format!("{} (allowed to fail)", wrapped.status_tooltip()))
        },
    )
}

pub fn build_unschedule<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    ExtendedCandidate::new(
        "build_unschedule",
        |subject: &S, _| Ok(current_status(subject)? == CoreStatus::Scheduled),
        |subject: &S, viewer: Option<&V>, _| {
            let action = subject_action(
                subject,
                viewer,
                Ability::UpdateBuild,
                "time-out",
                "Unschedule",
                "unschedule",
            )
            .map(|action| action.with_button_title("Unschedule job"));
            with_action(StatusOverride::new(), action)
        },
    )
}

pub fn build_play<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    ExtendedCandidate::when(
        "build_play",
        |subject: &S, _| subject.is_playable() && !subject.stops_environment(),
        |subject: &S, viewer: Option<&V>, _| {
            let action = subject_action(subject, viewer, Ability::PlayJob, "play", "Run", "play")
                .map(|action| {
                    let action = action.with_button_title("Run job");
                    match subject.manual_confirmation_message() {
                        Some(message) => action.with_confirmation_message(message),
                        None => action,
                    }
                });
            with_action(StatusOverride::new().label("manual play action"), action)
        },
    )
}

pub fn build_stop<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    ExtendedCandidate::when(
        "build_stop",
        |subject: &S, _| subject.is_playable() && subject.stops_environment(),
        |subject: &S, viewer: Option<&V>, _| {
            let action = subject_action(subject, viewer, Ability::PlayJob, "stop", "Stop", "play")
                .map(|action| action.with_button_title("Stop environment"));
            with_action(StatusOverride::new().label("manual stop action"), action)
        },
    )
}

/// Manual job the viewer is not allowed to start
pub fn build_action_not_allowed<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    ExtendedCandidate::when(
        "build_action_not_allowed",
        |subject: &S, viewer: Option<&V>| {
            subject.is_playable() && !viewer_can(viewer, Ability::PlayJob)
        },
        |_, _, wrapped| StatusOverride::new().label(format!("{} (not allowed)", wrapped.label())),
    )
}

pub fn build_retried<S, V>() -> ExtendedCandidate<S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: ?Sized + 'static,
{
    ExtendedCandidate::when(
        "build_retried",
        |subject: &S, _| subject.is_retried(),
        |_, _, wrapped| {
            StatusOverride::new().tooltip(format!("{} (retried)", wrapped.status_tooltip()))
        },
    )
}

/// Details page helpers gated on a read permission
#[derive(Debug, Clone)]
pub struct PathHelpers {
    ability: Ability,
    illustration: Option<Illustration>,
}

impl PathHelpers {
    pub fn new(ability: Ability) -> Self {
        Self {
            ability,
            illustration: None,
        }
    }

    /// Illustration of every core status before decoration
    pub fn with_default_illustration(mut self, illustration: Illustration) -> Self {
        self.illustration = Some(illustration);
        self
    }
}

impl<S, V> CommonHelpers<S, V> for PathHelpers
where
    S: StatusCapabilities + ?Sized,
    V: Permissions + ?Sized,
{
    fn has_details(&self, _subject: &S, viewer: Option<&V>) -> bool {
        viewer_can(viewer, self.ability)
    }

    fn details_path(&self, subject: &S) -> Option<String> {
        subject.path().map(str::to_string)
    }

    fn illustration(&self, _subject: &S) -> Option<Illustration> {
        self.illustration.clone()
    }
}

pub fn pipeline_groups<S, V>() -> Vec<ExtendedGroup<S, V>>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    vec![vec![success_warning(), pipeline_delayed(), pipeline_blocked()]]
}

pub fn stage_groups<S, V>() -> Vec<ExtendedGroup<S, V>>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    vec![vec![success_warning()]]
}

pub fn build_groups<S, V>(now: DateTime<Utc>) -> Vec<ExtendedGroup<S, V>>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    vec![
        vec![
            build_erased(),
            build_scheduled(now),
            build_manual(),
            build_canceled(),
            build_created(),
            build_waiting_for_resource(),
            build_preparing(),
            build_pending(),
            build_skipped(),
        ],
        vec![build_cancelable(), build_retryable()],
        vec![build_failed()],
        vec![
            build_failed_allowed(),
            build_unschedule(),
            build_play(),
            build_stop(),
        ],
        vec![build_action_not_allowed()],
        vec![build_retried()],
    ]
}

pub fn pipeline_factory<'a, S, V>(
    subject: &'a S,
    viewer: Option<&'a V>,
) -> StatusFactory<'a, S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    StatusFactory::new(subject, viewer)
        .with_groups(pipeline_groups())
        .with_helpers(PathHelpers::new(Ability::ReadPipeline))
}

pub fn stage_factory<'a, S, V>(subject: &'a S, viewer: Option<&'a V>) -> StatusFactory<'a, S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    StatusFactory::new(subject, viewer)
        .with_groups(stage_groups())
        .with_helpers(PathHelpers::new(Ability::ReadPipeline))
}

/// Build factory; `now` drives the countdown of delayed jobs
pub fn build_factory<'a, S, V>(
    subject: &'a S,
    viewer: Option<&'a V>,
    now: DateTime<Utc>,
) -> StatusFactory<'a, S, V>
where
    S: StatusCapabilities + ?Sized + 'static,
    V: Permissions + ?Sized + 'static,
{
    let helpers =
        PathHelpers::new(Ability::ReadBuild).with_default_illustration(no_trace_illustration());
    StatusFactory::new(subject, viewer)
        .with_groups(build_groups(now))
        .with_helpers(helpers)
}
