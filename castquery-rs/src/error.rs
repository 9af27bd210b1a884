//! Error types and exit codes for castquery.

use crate::query::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// Exit codes returned by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_QUERY: i32 = 2;
    pub const NETWORK_ERROR: i32 = 3;
    pub const TIMEOUT: i32 = 4;
    pub const UPSTREAM_ERROR: i32 = 5;
}

/// Main error type for castquery operations.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialize error: {0}")]
    YamlSerialize(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    Other(String),
}

/// Coarse classification of a failed search, reported to callers instead of
/// a bare timeout flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Network,
    Timeout,
    Upstream,
    Internal,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Validation(_) => ErrorKind::Validation,
            SearchError::Network(_) => ErrorKind::Network,
            SearchError::Timeout => ErrorKind::Timeout,
            SearchError::Upstream { .. } => ErrorKind::Upstream,
            _ => ErrorKind::Internal,
        }
    }

    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Validation => exit_code::INVALID_QUERY,
            ErrorKind::Network => exit_code::NETWORK_ERROR,
            ErrorKind::Timeout => exit_code::TIMEOUT,
            ErrorKind::Upstream => exit_code::UPSTREAM_ERROR,
            ErrorKind::Internal => exit_code::GENERAL_ERROR,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else if err.is_decode() {
            SearchError::Upstream {
                status: err.status().map(|s| s.as_u16()).unwrap_or(0),
                message: format!("Malformed response body: {}", err),
            }
        } else if let Some(status) = err.status() {
            SearchError::Upstream {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            SearchError::Network(err.to_string())
        }
    }
}

/// Result type alias for castquery operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    InvalidQuery,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::InvalidQuery => exit_code::INVALID_QUERY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_passes_through() {
        let err: SearchError = ValidationError::UnmatchedQuote.into();
        assert_eq!(err.to_string(), "Unmatched quotation mark");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.exit_code(), exit_code::INVALID_QUERY);
    }

    #[test]
    fn test_kinds_map_to_exit_codes() {
        assert_eq!(SearchError::Timeout.exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            SearchError::Network("refused".to_string()).exit_code(),
            exit_code::NETWORK_ERROR
        );
        assert_eq!(
            SearchError::Upstream {
                status: 500,
                message: "boom".to_string()
            }
            .exit_code(),
            exit_code::UPSTREAM_ERROR
        );
        assert_eq!(
            SearchError::ConfigError("bad".to_string()).kind(),
            ErrorKind::Internal
        );
    }
}
