//! # Status Error Types
//!
//! Structured error handling for status classification using thiserror.
//! Classification errors are never recovered inside the crate: they propagate
//! to the caller so a broken input can never be reported as a healthy status.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("Invalid status: {value}")]
    InvalidStatus { value: String },

    #[error("Extended status matcher failed: {matcher}: {message}")]
    MatcherFailed { matcher: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid input: {message}")]
    Input { message: String },
}

impl StatusError {
    pub fn invalid_status(value: impl Into<String>) -> Self {
        Self::InvalidStatus {
            value: value.into(),
        }
    }

    pub fn matcher_failed(matcher: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MatcherFailed {
            matcher: matcher.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for StatusError {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}

impl From<serde_json::Error> for StatusError {
    fn from(err: serde_json::Error) -> Self {
        Self::input(err.to_string())
    }
}

pub type StatusResult<T> = std::result::Result<T, StatusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StatusError::invalid_status("not_a_real_status");
        assert_eq!(err.to_string(), "Invalid status: not_a_real_status");

        let err = StatusError::matcher_failed("build_cancelable", "permission lookup failed");
        assert_eq!(
            err.to_string(),
            "Extended status matcher failed: build_cancelable: permission lookup failed"
        );
    }

    #[test]
    fn test_json_error_maps_to_input() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StatusError = json_err.into();
        assert!(matches!(err, StatusError::Input { .. }));
    }
}
