mod common;

use ci_status::status::{
    CompositeOptions, CoreStatus, JobStatus, StatusComposite, StatusDescriptor, StatusFactory,
};
use common::strategies::*;
use proptest::prelude::*;

proptest! {
    /// Property: Job order never changes the aggregate
    #[test]
    fn composite_is_order_independent(
        (jobs, shuffled) in shuffled_jobs_strategy(),
        dag in any::<bool>(),
    ) {
        let options = CompositeOptions::default().dag(dag);
        let original = StatusComposite::new(&jobs, options);
        let reordered = StatusComposite::new(&shuffled, options);

        prop_assert_eq!(original.status(), reordered.status());
        prop_assert_eq!(original.warnings(), reordered.warnings());
    }

    /// Property: Repeating jobs never changes the aggregate
    #[test]
    fn composite_ignores_multiplicity(jobs in jobs_strategy()) {
        let doubled: Vec<JobStatus> = jobs.iter().chain(jobs.iter()).copied().collect();

        prop_assert_eq!(
            StatusComposite::from_jobs(&jobs).result(),
            StatusComposite::from_jobs(&doubled).result()
        );
    }

    /// Property: A non-empty pipeline always has a status
    #[test]
    fn non_empty_pipelines_are_classified(jobs in jobs_strategy()) {
        prop_assert!(StatusComposite::from_jobs(&jobs).status().is_some());
    }

    /// Property: Warnings come only from successful allowed-to-fail jobs
    #[test]
    fn warnings_require_allowed_success(jobs in jobs_strategy()) {
        let expected = jobs
            .iter()
            .any(|job| job.status == CoreStatus::Success && job.allow_failure == Some(true));

        prop_assert_eq!(StatusComposite::from_jobs(&jobs).warnings(), expected);
    }

    /// Property: Disabling allow-failure is the same as dropping every flag
    #[test]
    fn disabled_allow_failure_matches_unflagged_jobs(jobs in jobs_strategy()) {
        let unflagged: Vec<JobStatus> = jobs.iter().map(|job| JobStatus::new(job.status)).collect();
        let options = CompositeOptions::default().with_allow_failure(false);

        prop_assert_eq!(
            StatusComposite::new(&jobs, options).result(),
            StatusComposite::from_jobs(&unflagged).result()
        );
        prop_assert!(!StatusComposite::new(&jobs, options).warnings());
    }

    /// Property: Any skipped dependency skips a DAG group
    #[test]
    fn dag_with_skipped_job_is_skipped(
        mut jobs in jobs_strategy(),
        position in any::<prop::sample::Index>(),
    ) {
        let index = position.index(jobs.len() + 1);
        jobs.insert(index, JobStatus::new(CoreStatus::Skipped));

        let options = CompositeOptions::default().dag(true);
        prop_assert_eq!(StatusComposite::new(&jobs, options).status(), Some(CoreStatus::Skipped));
    }

    /// Property: Without extended groups a descriptor is its core status
    #[test]
    fn undecorated_descriptor_matches_core(status in core_status_strategy()) {
        let descriptor = StatusFactory::<str, ()>::new(status.as_str(), None).fabricate().unwrap();
        let presentation = status.presentation();

        prop_assert_eq!(&descriptor, &StatusDescriptor::core(status));
        prop_assert_eq!(descriptor.text(), presentation.text);
        prop_assert_eq!(descriptor.label(), presentation.label);
        prop_assert_eq!(descriptor.group(), status.as_str());
        prop_assert_eq!(descriptor.badge_tooltip(), status.as_str());
    }

    /// Property: Strings outside the status table are rejected
    #[test]
    fn unknown_statuses_are_rejected(raw in "[a-z_]{1,24}") {
        prop_assume!(CoreStatus::ALL.iter().all(|status| status.as_str() != raw));
        prop_assert!(StatusFactory::<str, ()>::new(raw.as_str(), None).fabricate().is_err());
    }
}

#[cfg(test)]
mod composite_invariants {
    use super::*;

    #[test]
    fn test_every_single_status_classifies_as_itself() {
        for status in CoreStatus::ALL {
            assert_eq!(StatusComposite::from_jobs([status]).status(), Some(status));
        }
    }

    #[test]
    fn test_only_allowed_failures_are_skipped() {
        let jobs = [
            JobStatus::with_allow_failure(CoreStatus::Failed, true),
            JobStatus::with_allow_failure(CoreStatus::Canceled, true),
        ];
        assert_eq!(StatusComposite::from_jobs(&jobs).status(), Some(CoreStatus::Skipped));
    }
}
