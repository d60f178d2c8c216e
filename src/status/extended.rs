//! # Extended Statuses
//!
//! Extension points the embedding system uses to decorate core statuses.
//!
//! An [`ExtendedCandidate`] pairs a matcher predicate with the override it
//! contributes. Candidates are arranged in ordered [`ExtendedGroup`]s: the
//! factory takes the first matching candidate of each group, so a group adds
//! at most one decoration.
//!
//! A decorator sees the descriptor it wraps, so it can build on what earlier
//! groups set (e.g. append to the tooltip).

use super::descriptor::{Illustration, StatusDescriptor, StatusOverride};
use crate::error::StatusResult;
use std::fmt;

/// Anything that has a stored status
pub trait StatusSubject {
    /// Raw stored status, `None` when the subject has not been persisted yet
    fn raw_status(&self) -> Option<&str>;
}

impl StatusSubject for str {
    fn raw_status(&self) -> Option<&str> {
        Some(self)
    }
}

impl StatusSubject for String {
    fn raw_status(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: StatusSubject + ?Sized> StatusSubject for &T {
    fn raw_status(&self) -> Option<&str> {
        (**self).raw_status()
    }
}

type Matcher<S, V> = dyn Fn(&S, Option<&V>) -> StatusResult<bool> + Send + Sync;
type Decorator<S, V> = dyn Fn(&S, Option<&V>, &StatusDescriptor) -> StatusOverride + Send + Sync;

/// One extended status: a named matcher and the override it applies
pub struct ExtendedCandidate<S: ?Sized, V: ?Sized> {
    name: &'static str,
    matcher: Box<Matcher<S, V>>,
    decorator: Box<Decorator<S, V>>,
}

impl<S: ?Sized, V: ?Sized> ExtendedCandidate<S, V> {
    pub fn new<M, D>(name: &'static str, matcher: M, decorator: D) -> Self
    where
        M: Fn(&S, Option<&V>) -> StatusResult<bool> + Send + Sync + 'static,
        D: Fn(&S, Option<&V>, &StatusDescriptor) -> StatusOverride + Send + Sync + 'static,
    {
        Self {
            name,
            matcher: Box::new(matcher),
            decorator: Box::new(decorator),
        }
    }

    /// Candidate with an infallible matcher
    pub fn when<M, D>(name: &'static str, matcher: M, decorator: D) -> Self
    where
        M: Fn(&S, Option<&V>) -> bool + Send + Sync + 'static,
        D: Fn(&S, Option<&V>, &StatusDescriptor) -> StatusOverride + Send + Sync + 'static,
    {
        Self::new(name, move |subject, viewer| Ok(matcher(subject, viewer)), decorator)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Errors are returned as-is; a failing matcher never counts as a miss
    pub fn matches(&self, subject: &S, viewer: Option<&V>) -> StatusResult<bool> {
        (self.matcher)(subject, viewer)
    }

    /// Override to apply on top of `wrapped`
    pub fn decorate(
        &self,
        subject: &S,
        viewer: Option<&V>,
        wrapped: &StatusDescriptor,
    ) -> StatusOverride {
        (self.decorator)(subject, viewer, wrapped)
    }
}

impl<S: ?Sized, V: ?Sized> fmt::Debug for ExtendedCandidate<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedCandidate").field("name", &self.name).finish()
    }
}

/// Candidates competing for one decoration slot, in priority order
pub type ExtendedGroup<S, V> = Vec<ExtendedCandidate<S, V>>;

/// Details helpers shared by every core status a factory builds
pub trait CommonHelpers<S: ?Sized, V: ?Sized> {
    fn has_details(&self, _subject: &S, _viewer: Option<&V>) -> bool {
        false
    }

    fn details_path(&self, _subject: &S) -> Option<String> {
        None
    }

    /// Empty-state illustration used when no extended status provides one
    fn illustration(&self, _subject: &S) -> Option<Illustration> {
        None
    }
}

/// Helpers for subjects without a details page
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHelpers;

impl<S: ?Sized, V: ?Sized> CommonHelpers<S, V> for NoHelpers {}
