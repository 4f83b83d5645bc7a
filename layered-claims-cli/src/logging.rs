//! Logging setup. Logs go to stderr, separate from the diagnostics.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter, e.g. `layered_claims=trace`.
pub(crate) const LOG_ENV: &str = "CLAIMLINT_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogLevel {
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

fn default_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.as_filter_str())
}

/// Install the global subscriber. `CLAIMLINT_LOG` wins over `level`.
///
/// A subscriber that is already installed is kept.
pub(crate) fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(LogLevel::Warn);
        init_logging(LogLevel::Debug);
    }

    #[test]
    fn filter_uses_level() {
        assert_eq!(default_filter(LogLevel::Debug).to_string(), "debug");
        assert_eq!(default_filter(LogLevel::Warn).to_string(), "warn");
    }
}
