//! # Status Factory
//!
//! Builds the [`StatusDescriptor`] of one subject for one viewer:
//!
//! 1. read the subject's raw status, defaulting to `created`;
//! 2. resolve it to a [`CoreStatus`] and build the core descriptor with the
//!    common helpers;
//! 3. pick the first matching candidate of every extended group;
//! 4. fold the picked overrides over the core descriptor in group order, each
//!    decorator seeing the descriptor folded so far.
//!
//! Unknown statuses and matcher failures abort fabrication with an error.

use super::core_status::CoreStatus;
use super::descriptor::StatusDescriptor;
use super::extended::{CommonHelpers, ExtendedCandidate, ExtendedGroup, NoHelpers, StatusSubject};
use crate::constants::DEFAULT_STATUS;
use crate::error::StatusResult;
use crate::logging;
use tracing::trace;

pub struct StatusFactory<'a, S: ?Sized, V: ?Sized> {
    subject: &'a S,
    viewer: Option<&'a V>,
    groups: Vec<ExtendedGroup<S, V>>,
    helpers: Box<dyn CommonHelpers<S, V> + 'a>,
}

impl<'a, S, V> StatusFactory<'a, S, V>
where
    S: StatusSubject + ?Sized,
    V: ?Sized,
{
    pub fn new(subject: &'a S, viewer: Option<&'a V>) -> Self {
        Self {
            subject,
            viewer,
            groups: Vec::new(),
            helpers: Box::new(NoHelpers),
        }
    }

    pub fn with_groups(mut self, groups: Vec<ExtendedGroup<S, V>>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_helpers<H>(mut self, helpers: H) -> Self
    where
        H: CommonHelpers<S, V> + 'a,
    {
        self.helpers = Box::new(helpers);
        self
    }

    pub fn subject(&self) -> &'a S {
        self.subject
    }

    pub fn viewer(&self) -> Option<&'a V> {
        self.viewer
    }

    /// Stored status of the subject, or the default for unsaved subjects
    pub fn raw_status(&self) -> &str {
        self.subject.raw_status().unwrap_or(DEFAULT_STATUS.as_str())
    }

    /// Undecorated descriptor of the subject
    pub fn core_status(&self) -> StatusResult<StatusDescriptor> {
        let status: CoreStatus = self.raw_status().parse().map_err(|err| {
            logging::log_error("status_factory", "core_status", &format!("{err}"));
            err
        })?;

        let has_details = self.helpers.has_details(self.subject, self.viewer);
        let details_path = self.helpers.details_path(self.subject);

        Ok(StatusDescriptor::core_with_details(status, has_details, details_path)
            .with_illustration(self.helpers.illustration(self.subject)))
    }

    /// First matching candidate of every group, in group order
    pub fn extended_statuses(&self) -> StatusResult<Vec<&ExtendedCandidate<S, V>>> {
        let mut selected = Vec::with_capacity(self.groups.len());

        for group in &self.groups {
            for candidate in group {
                if candidate.matches(self.subject, self.viewer)? {
                    trace!(extended = candidate.name(), "Extended status matched");
                    selected.push(candidate);
                    break;
                }
            }
        }

        Ok(selected)
    }

    pub fn fabricate(&self) -> StatusResult<StatusDescriptor> {
        let core = self.core_status()?;
        let extended = self.extended_statuses()?;

        let descriptor = extended.into_iter().fold(core, |wrapped, candidate| {
            let overrides = candidate.decorate(self.subject, self.viewer, &wrapped);
            wrapped.apply(candidate.name(), overrides)
        });

        logging::log_status_fabrication(
            descriptor.core_status(),
            descriptor.group(),
            descriptor.extended(),
        );

        Ok(descriptor)
    }
}
