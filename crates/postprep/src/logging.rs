//! Tracing subscriber setup for the binary.

use postprep_error::{ConfigError, PostprepResult};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// How log output is filtered and formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is unset (e.g. "info", "postprep_publish=debug")
    pub log_level: String,
    /// Emit one JSON object per event instead of human-readable lines
    pub json_logs: bool,
}

impl LoggingConfig {
    /// Create a configuration from filter directives.
    pub fn new(log_level: impl Into<String>) -> Self {
        Self {
            log_level: log_level.into(),
            json_logs: false,
        }
    }

    /// `debug` when verbose, otherwise `info`.
    pub fn from_verbosity(verbose: bool) -> Self {
        Self::new(if verbose { "debug" } else { "info" })
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Filter built from the configured directives alone, ignoring `RUST_LOG`.
    pub fn directive_filter(&self) -> PostprepResult<EnvFilter> {
        EnvFilter::try_new(&self.log_level).map_err(|e| {
            ConfigError::new(format!("Invalid log filter '{}': {}", self.log_level, e)).into()
        })
    }
}

/// Install the global subscriber. Logs go to stderr so command output stays clean.
///
/// `RUST_LOG` takes precedence over `config.log_level` when it is set.
pub fn init_logging(config: &LoggingConfig) -> PostprepResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => config.directive_filter()?,
    };

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LoggingConfig::from_verbosity(true).log_level, "debug");
        assert_eq!(LoggingConfig::from_verbosity(false).log_level, "info");
    }

    #[test]
    fn test_json_logs_flag() {
        let config = LoggingConfig::new("postprep_publish=debug").with_json_logs(true);
        assert_eq!(config.log_level, "postprep_publish=debug");
        assert!(config.json_logs);
    }

    #[test]
    fn test_directive_filter_accepts_targets() {
        let config = LoggingConfig::new("info,postprep_storage=trace");
        assert!(config.directive_filter().is_ok());
    }
}
