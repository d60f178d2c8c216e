//! # CI Status Classifier
//!
//! Command-line front end for the composite engine and the status factory.
//! Reads job statuses as JSON and prints the classified status as JSON.

use chrono::Utc;
use ci_status::config::ConfigManager;
use ci_status::logging;
use ci_status::status::presets::{
    build_factory, pipeline_factory, stage_factory, Ability, Permissions, StatusCapabilities,
};
use ci_status::status::{CompositeOptions, JobStatus, StatusComposite, StatusSubject};
use ci_status::{StatusError, StatusResult};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use std::process;
use tracing::info;

#[derive(Parser)]
#[command(name = "ci-status")]
#[command(about = "Classify CI job statuses")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration directory path (default: config)
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Raise the configured log level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate a JSON array of jobs into one status
    Composite {
        /// Read jobs from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Treat the jobs as `needs:` dependencies
        #[arg(long, conflicts_with = "no_dag")]
        dag: bool,

        /// Treat the jobs as a stage even when the configuration enables DAG mode
        #[arg(long)]
        no_dag: bool,

        /// Honor allow_failure flags even when the configuration disables them
        #[arg(long, conflicts_with = "without_allow_failure")]
        with_allow_failure: bool,

        /// Ignore allow_failure flags
        #[arg(long)]
        without_allow_failure: bool,
    },

    /// Print the decorated descriptor of a status
    Describe {
        /// Raw status, e.g. `success`
        status: String,

        /// Subject has allowed-to-fail failures
        #[arg(long)]
        warnings: bool,

        /// Job is allowed to fail
        #[arg(long)]
        allows_failure: bool,

        /// Job was retried
        #[arg(long)]
        retried: bool,

        /// Failure reason of a failed job, e.g. `script_failure`
        #[arg(long)]
        failure_reason: Option<String>,

        #[arg(long, value_enum, default_value = "stage")]
        kind: SubjectKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SubjectKind {
    Pipeline,
    Stage,
    Build,
}

#[derive(Deserialize)]
struct RawJob {
    status: String,
    #[serde(default)]
    allow_failure: Option<bool>,
}

#[derive(Debug, Default)]
struct CliSubject {
    status: String,
    warnings: bool,
    allows_failure: bool,
    retried: bool,
    failure_reason: Option<String>,
}

impl StatusSubject for CliSubject {
    fn raw_status(&self) -> Option<&str> {
        Some(&self.status)
    }
}

impl StatusCapabilities for CliSubject {
    fn has_warnings(&self) -> bool {
        self.warnings
    }

    fn allows_failure(&self) -> bool {
        self.allows_failure
    }

    fn is_retried(&self) -> bool {
        self.retried
    }

    fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }
}

/// Command line callers have no permissions
struct Anonymous;

impl Permissions for Anonymous {
    fn can(&self, _ability: Ability) -> bool {
        false
    }
}

fn main() {
    let cli = Cli::parse();

    let manager = match ConfigManager::load_from_directory(cli.config_dir.clone()) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let logging_config = &manager.config().logging;
    logging::init_logging_with(
        logging::raise_level(&logging_config.level, cli.verbose),
        logging_config.json,
    );

    let result = match &cli.command {
        Commands::Composite {
            file,
            dag,
            no_dag,
            with_allow_failure,
            without_allow_failure,
        } => {
            let defaults = CompositeOptions::from(&manager.config().composite);
            let options = defaults
                .dag(resolve_flag(defaults.dag, *dag, *no_dag))
                .with_allow_failure(resolve_flag(
                    defaults.with_allow_failure,
                    *with_allow_failure,
                    *without_allow_failure,
                ));
            read_input(file.as_ref()).and_then(|input| composite(&input, options))
        }
        Commands::Describe {
            status,
            warnings,
            allows_failure,
            retried,
            failure_reason,
            kind,
        } => {
            let subject = CliSubject {
                status: status.clone(),
                warnings: *warnings,
                allows_failure: *allows_failure,
                retried: *retried,
                failure_reason: failure_reason.clone(),
            };
            describe(&subject, *kind)
        }
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            logging::log_error("ci-status", "main", &e.to_string());
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Configured value unless a command line switch turns it on or off
fn resolve_flag(configured: bool, on: bool, off: bool) -> bool {
    if off {
        false
    } else {
        on || configured
    }
}

fn read_input(file: Option<&PathBuf>) -> StatusResult<String> {
    let mut input = String::new();
    match file {
        Some(path) => {
            input = std::fs::read_to_string(path)
                .map_err(|e| StatusError::input(format!("{}: {e}", path.display())))?;
        }
        None => {
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| StatusError::input(format!("stdin: {e}")))?;
        }
    }
    Ok(input)
}

fn composite(input: &str, options: CompositeOptions) -> StatusResult<String> {
    let raw_jobs: Vec<RawJob> = serde_json::from_str(input)?;
    let jobs = raw_jobs
        .iter()
        .map(|job| JobStatus::parse(&job.status, job.allow_failure))
        .collect::<StatusResult<Vec<JobStatus>>>()?;

    let result = StatusComposite::new(&jobs, options).result();
    info!(jobs = jobs.len(), status = ?result.status, "Composite classified");

    Ok(serde_json::to_string(&result)?)
}

fn describe(subject: &CliSubject, kind: SubjectKind) -> StatusResult<String> {
    let viewer = Anonymous;

    let descriptor = match kind {
        SubjectKind::Pipeline => pipeline_factory(subject, Some(&viewer)).fabricate()?,
        SubjectKind::Stage => stage_factory(subject, Some(&viewer)).fabricate()?,
        SubjectKind::Build => build_factory(subject, Some(&viewer), Utc::now()).fabricate()?,
    };
    info!(kind = ?kind, group = descriptor.group(), "Status described");

    Ok(serde_json::to_string_pretty(&descriptor)?)
}
