#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections

//! # CI Status Core
//!
//! Status classification for CI jobs, stages and pipelines.
//!
//! ## Overview
//!
//! Two pure, synchronous components:
//!
//! - **Composite engine** ([`status::StatusComposite`]): rolls the statuses of
//!   many jobs up into the single status of a pipeline, a stage or a group of
//!   `needs:` dependencies, honouring jobs that are allowed to fail.
//! - **Status factory** ([`status::StatusFactory`]): turns one stored status
//!   into a displayable [`status::StatusDescriptor`] by folding extended
//!   statuses (retry, cancel, warnings...) over a static core status.
//!
//! Neither component performs I/O or keeps state between calls, so both can be
//! used from any number of threads.
//!
//! ## Module Organization
//!
//! - [`status`] - Composite engine, core statuses and decoration
//! - [`status::presets`] - Built-in extended statuses for pipelines, stages and builds
//! - [`constants`] - Status groupings
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use ci_status::status::{CoreStatus, JobStatus, StatusComposite, StatusFactory};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let jobs = vec![
//!     JobStatus::new(CoreStatus::Success),
//!     JobStatus::new(CoreStatus::Running),
//! ];
//! let status = StatusComposite::from_jobs(&jobs).status();
//! assert_eq!(status, Some(CoreStatus::Running));
//!
//! let descriptor = StatusFactory::<str, ()>::new("running", None).fabricate()?;
//! assert_eq!(descriptor.icon(), "status_running");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod status;

pub use config::{ConfigManager, StatusConfig};
pub use constants::{status_groups, DEFAULT_STATUS};
pub use error::{StatusError, StatusResult};
pub use status::{
    CompositeOptions, CompositeStatus, CoreStatus, JobOutcome, JobStatus, StatusComposite,
    StatusDescriptor, StatusFactory,
};
