// Status classification for CI jobs, stages and pipelines
//
// `composite` rolls many job statuses up into one; `factory` turns one status
// into a decorated, displayable descriptor.

pub mod composite;
pub mod core_status;
pub mod descriptor;
pub mod extended;
pub mod factory;
pub mod presentation;
pub mod presets;

// Re-export main types for convenient access
pub use composite::{
    CompositeOptions, CompositeStatus, EffectiveStatus, JobOutcome, JobStatus, ProjectRef,
    StatusComposite,
};
pub use core_status::CoreStatus;
pub use descriptor::{ActionMethod, Illustration, StatusAction, StatusDescriptor, StatusOverride};
pub use extended::{CommonHelpers, ExtendedCandidate, ExtendedGroup, NoHelpers, StatusSubject};
pub use factory::StatusFactory;
pub use presentation::CorePresentation;
