//! CLI error types.

use std::path::PathBuf;

use calplan_core::{LoggingError, ValidationError};
use calplan_store::StoreError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`CalplanConfig`](crate::config::CalplanConfig).
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Store or validation error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A command-line value was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The event overlaps stored events and `--force` was not given.
    #[error("일정이 {count}개의 기존 일정과 겹칩니다. 저장하려면 --force를 사용하세요.")]
    Conflict { count: usize },

    /// JSON output could not be produced.
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging setup failed.
    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// The validation failure behind this error, if any.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Store(StoreError::Validation(err)) => Some(err),
            _ => None,
        }
    }

    /// Full text shown to the user: the error line, then one line per
    /// rejected field.
    pub fn report(&self) -> String {
        let mut lines = vec![self.to_string()];
        if let Some(err) = self.validation() {
            lines.extend(
                [
                    ("startTime", err.start_time_message()),
                    ("endTime", err.end_time_message()),
                ]
                .into_iter()
                .filter_map(|(field, message)| Some(format!("  {}: {}", field, message?))),
            );
        }
        lines.join("\n")
    }
}
