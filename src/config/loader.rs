//! Configuration Loader
//!
//! Environment-aware configuration loading. Handles file discovery,
//! environment detection and merging of overrides.

use super::StatusConfig;
use crate::error::StatusResult;
use crate::logging;
use config::{Config, Environment, File, Map};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "CI_STATUS";

/// Loaded configuration together with where it came from
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: StatusConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> StatusResult<ConfigManager> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> StatusResult<ConfigManager> {
        let environment = logging::get_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> StatusResult<ConfigManager> {
        Self::load_with_variables(config_dir, environment, None)
    }

    /// Load configuration with an explicit set of `CI_STATUS__*` variables
    /// instead of the process environment
    pub fn load_with_variables(
        config_dir: Option<PathBuf>,
        environment: &str,
        variables: Option<Map<String, String>>,
    ) -> StatusResult<ConfigManager> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            environment = %environment,
            directory = %config_directory.display(),
            "Loading configuration"
        );

        let config: StatusConfig = Config::builder()
            .add_source(File::from(Self::base_file(&config_directory)).required(false))
            .add_source(
                File::from(Self::environment_file(&config_directory, environment)).required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(variables),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;

        debug!(
            environment = %environment,
            with_allow_failure = config.composite.with_allow_failure,
            dag = config.composite.dag,
            log_level = %config.logging.level,
            "Configuration loaded successfully"
        );

        Ok(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &StatusConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    fn default_config_directory() -> PathBuf {
        std::env::var("CI_STATUS_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"))
    }

    fn base_file(directory: &Path) -> PathBuf {
        directory.join("ci_status.yaml")
    }

    fn environment_file(directory: &Path, environment: &str) -> PathBuf {
        directory.join(format!("ci_status.{environment}.yaml"))
    }
}
