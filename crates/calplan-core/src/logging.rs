//! Log output for calplan binaries.
//!
//! Every crate logs through `tracing` macros; this module installs the one
//! global subscriber that prints them to stderr.
//!
//! ```ignore
//! use calplan_core::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::for_cli(false))?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Crates whose events the default filter lets through.
const CALPLAN_TARGETS: [&str; 3] = ["calplan", "calplan_core", "calplan_store"];

/// Errors from installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to install log subscriber: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
}

/// How log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One short line per event.
    #[default]
    Compact,
    /// JSON lines.
    Json,
}

/// What to log and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level for calplan crates when neither `directive` nor `RUST_LOG` is set.
    pub level: Level,
    pub format: LogFormat,
    /// Adds target, file and line to each line.
    pub verbose: bool,
    pub timestamps: bool,
    /// Explicit filter directive; takes precedence over `RUST_LOG`.
    pub directive: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::for_cli(false)
    }
}

impl LogConfig {
    /// One-shot commands: warnings only, or everything down to debug.
    #[must_use]
    pub fn for_cli(debug: bool) -> Self {
        Self {
            level: if debug { Level::DEBUG } else { Level::WARN },
            format: LogFormat::Compact,
            verbose: debug,
            timestamps: false,
            directive: None,
        }
    }

    /// The long-running watch loop: info level with timestamps.
    #[must_use]
    pub fn for_watcher() -> Self {
        Self {
            level: Level::INFO,
            timestamps: true,
            ..Self::for_cli(false)
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    /// `calplan=LEVEL,calplan_core=LEVEL,...` for the configured level.
    pub fn default_directive(&self) -> String {
        CALPLAN_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.level))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        match self.directive {
            Some(ref directive) => Ok(EnvFilter::try_new(directive)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }
}

/// Installs the global subscriber. Call once, before the first log line.
///
/// # Errors
///
/// Fails if a subscriber is already installed or the directive does not parse.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = config.filter()?;

    let layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(config.verbose)
            .with_line_number(config.verbose)
            .boxed(),
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(config.verbose)
                .with_file(config.verbose)
                .with_line_number(config.verbose);
            if config.timestamps {
                layer.boxed()
            } else {
                layer.without_time().boxed()
            }
        }
    };

    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(filter).with(layer))?;
    Ok(())
}
