//! Logging setup.
//!
//! Diagnostics go to stderr (or `LEAFCTL_LOG_FILE`) so that stdout carries
//! only command output.

use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const LOG_LEVEL_ENV: &str = "LEAFCTL_LOG";
const LOG_FORMAT_ENV: &str = "LEAFCTL_LOG_FORMAT";
const LOG_FILE_ENV: &str = "LEAFCTL_LOG_FILE";

/// Target of the login progress messages, shown unless a level is chosen.
const SESSION_TARGET: &str = "leafctl::core::session";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable logs.
    #[default]
    Human,
    /// JSON logs (one event per line).
    Json,
    /// Compact logs (single line, terse).
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Log level from CLI argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    #[default]
    Error,
}

impl LogLevel {
    /// Parse from CLI argument.
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "verbose" | "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" | "critical" => Some(Self::Error),
            _ => None,
        }
    }

    /// Convert to tracing filter string.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse log level from LEAFCTL_LOG env var.
#[must_use]
pub fn parse_log_level_from_env() -> Option<LogLevel> {
    env_value(LOG_LEVEL_ENV).and_then(|v| LogLevel::from_arg(&v))
}

/// Parse log format from LEAFCTL_LOG_FORMAT env var.
#[must_use]
pub fn parse_log_format_from_env() -> Option<LogFormat> {
    env_value(LOG_FORMAT_ENV).and_then(|v| LogFormat::from_arg(&v))
}

/// Parse log file path from LEAFCTL_LOG_FILE env var.
#[must_use]
pub fn parse_log_file_from_env() -> Option<PathBuf> {
    env_value(LOG_FILE_ENV).map(PathBuf::from)
}

/// Filter directives for an explicit level, or the default when `None`.
///
/// The default keeps errors plus the login progress messages.
#[must_use]
pub fn filter_directives(level: Option<LogLevel>, verbose: bool) -> String {
    match (level, verbose) {
        (Some(LogLevel::Trace), _) => "leafctl=trace".to_string(),
        (_, true) => "leafctl=debug".to_string(),
        (Some(level), false) => format!("leafctl={}", level.as_filter()),
        (None, false) => format!("leafctl=error,{SESSION_TARGET}=info"),
    }
}

/// Initialize logging with the given settings.
///
/// `level` is `None` when neither `--log-level` nor `LEAFCTL_LOG` is set.
pub fn init(level: Option<LogLevel>, format: LogFormat, log_file: Option<PathBuf>, verbose: bool) {

    let file = log_file.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok()
    });

    let writer = file
        .and_then(|inner| inner.try_clone().ok())
        .map_or_else(|| BoxMakeWriter::new(std::io::stderr), BoxMakeWriter::new);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level, verbose)));

    match format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_writer(writer)
                .with_span_events(FmtSpan::CLOSE)
                .try_init()
                .ok();
        }
        LogFormat::Compact => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .compact()
                .with_writer(writer)
                .with_target(true)
                .try_init()
                .ok();
        }
        LogFormat::Human => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_target(false)
                .without_time()
                .try_init()
                .ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[allow(unsafe_code)]
    fn with_env_var(key: &str, value: &str, f: impl FnOnce()) {
        let _guard = ENV_LOCK.lock().unwrap();
        let prior = std::env::var(key).ok();
        unsafe {
            std::env::set_var(key, value);
        }
        f();
        match prior {
            Some(val) => unsafe {
                std::env::set_var(key, val);
            },
            None => unsafe {
                std::env::remove_var(key);
            },
        }
    }

    #[test]
    fn log_level_aliases() {
        assert_eq!(LogLevel::from_arg("VERBOSE"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_arg("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_arg("critical"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_arg("loud"), None);
    }

    #[test]
    fn default_filter_shows_login_progress() {
        assert_eq!(
            filter_directives(None, false),
            "leafctl=error,leafctl::core::session=info"
        );
        assert_eq!(filter_directives(Some(LogLevel::Error), false), "leafctl=error");
        assert_eq!(filter_directives(Some(LogLevel::Info), true), "leafctl=debug");
        assert_eq!(filter_directives(Some(LogLevel::Trace), true), "leafctl=trace");
    }

    #[test]
    fn env_var_log_level_parsing() {
        with_env_var(LOG_LEVEL_ENV, "info", || {
            assert_eq!(parse_log_level_from_env(), Some(LogLevel::Info));
        });

        with_env_var(LOG_LEVEL_ENV, "   ", || {
            assert_eq!(parse_log_level_from_env(), None);
        });
    }

    #[test]
    fn env_var_log_format_parsing() {
        with_env_var(LOG_FORMAT_ENV, "Compact", || {
            assert_eq!(parse_log_format_from_env(), Some(LogFormat::Compact));
        });
    }
}
