//! # Status Configuration System
//!
//! YAML-based configuration with environment overrides.
//!
//! ## Architecture
//!
//! - **Base file**: `config/ci_status.yaml`
//! - **Environment file**: `config/ci_status.<env>.yaml` overrides the base
//! - **Variables**: `CI_STATUS__SECTION__KEY` overrides both
//! - **Explicit Validation**: invalid values are rejected, never replaced
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ci_status::config::ConfigManager;
//! use ci_status::status::CompositeOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let options = CompositeOptions::from(&manager.config().composite);
//! # Ok(())
//! # }
//! ```

pub mod loader;

use crate::error::{StatusError, StatusResult};
use crate::status::CompositeOptions;
use serde::{Deserialize, Serialize};

pub use loader::ConfigManager;

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Root configuration structure mirroring ci_status.yaml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Default flags of composite classification
    pub composite: CompositeConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompositeConfig {
    pub with_allow_failure: bool,
    pub dag: bool,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            with_allow_failure: true,
            dag: false,
        }
    }
}

impl From<&CompositeConfig> for CompositeOptions {
    fn from(config: &CompositeConfig) -> Self {
        CompositeOptions::default()
            .with_allow_failure(config.with_allow_failure)
            .dag(config.dag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl StatusConfig {
    pub fn validate(&self) -> StatusResult<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(StatusError::configuration(format!(
                "logging.level must be one of {LOG_LEVELS:?}, got '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}
