use ci_status::status::{CoreStatus, JobStatus};
use proptest::prelude::*;

/// Strategy for generating any core status
pub fn core_status_strategy() -> impl Strategy<Value = CoreStatus> {
    prop::sample::select(CoreStatus::ALL.to_vec())
}

/// Strategy for generating one job, with or without an allow-failure flag
pub fn job_strategy() -> impl Strategy<Value = JobStatus> {
    (core_status_strategy(), prop::option::of(any::<bool>()))
        .prop_map(|(status, allow_failure)| JobStatus { status, allow_failure })
}

/// Strategy for generating a non-empty pipeline of jobs
pub fn jobs_strategy() -> impl Strategy<Value = Vec<JobStatus>> {
    prop::collection::vec(job_strategy(), 1..24)
}

/// Strategy for generating a pipeline together with a reordering of it
pub fn shuffled_jobs_strategy() -> impl Strategy<Value = (Vec<JobStatus>, Vec<JobStatus>)> {
    jobs_strategy().prop_flat_map(|jobs| (Just(jobs.clone()), Just(jobs).prop_shuffle()))
}
