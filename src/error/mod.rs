//! Error types for leafctl.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! Errors are categorized into five main categories:
//! - **Authentication**: Login rejected or session identifiers refused
//! - **Network**: Connection, timeout, or transport issues
//! - **Configuration**: Settings file missing, empty, unparseable, or incomplete
//! - **Vehicle API**: The remote service returned an error or an unexpected payload
//! - **Internal**: I/O, serialization, or unclassified issues
//!
//! Each error has a stable error code (e.g., `LEAF-C001`) for programmatic handling.

pub mod suggestions;

use thiserror::Error;

pub use suggestions::FixSuggestion;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Login or session problems.
    Authentication,
    /// Network issues (timeout, connection refused, transport failures).
    Network,
    /// Settings file issues.
    Configuration,
    /// Errors reported by the vehicle API or undecodable responses.
    VehicleApi,
    /// Internal errors (I/O, serialization, unclassified).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Authentication => "Authentication error",
            Self::Network => "Network error",
            Self::Configuration => "Configuration error",
            Self::VehicleApi => "Vehicle API error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Authentication => "A",
            Self::Network => "N",
            Self::Configuration => "C",
            Self::VehicleApi => "P",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success (including bare invocation that prints help)
    Success = 0,
    /// Unexpected failure
    GeneralError = 1,
    /// Settings file missing or invalid
    ConfigError = 2,
    /// Response could not be decoded
    ParseError = 3,
    /// Timeout
    Timeout = 4,
    /// Login or session rejected
    AuthError = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Main error type for leafctl operations.
#[derive(Error, Debug)]
pub enum LeafError {
    // ==========================================================================
    // Authentication errors
    // ==========================================================================
    /// The login call was rejected.
    #[error("login failed: {reason}")]
    LoginFailed { reason: String },

    /// The remote service refused the stored session identifiers.
    #[error("session rejected by vehicle API: {message}")]
    SessionRejected { message: String },

    // ==========================================================================
    // Network errors
    // ==========================================================================
    /// Request timed out after the given number of seconds.
    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    /// Connection refused or host unreachable.
    #[error("connection refused: {host}")]
    ConnectionRefused { host: String },

    /// Generic transport error.
    #[error("network error: {0}")]
    Network(String),

    // ==========================================================================
    // Configuration errors
    // ==========================================================================
    /// Settings file not found at the expected path.
    #[error("settings file not found: {path}")]
    ConfigNotFound { path: String },

    /// Settings file exists but contains nothing.
    #[error("settings file is empty: {path}")]
    ConfigEmpty { path: String },

    /// Error parsing the settings file.
    #[error("settings parse error at {path}: {message}")]
    ConfigParse {
        path: String,
        line: Option<usize>,
        message: String,
    },

    /// Missing or invalid value in the settings file.
    #[error("invalid setting '{key}': {message}")]
    ConfigInvalid {
        key: String,
        value: String,
        message: String,
    },

    /// Generic configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    // ==========================================================================
    // Vehicle API errors
    // ==========================================================================
    /// The vehicle API reported a failure for an endpoint.
    #[error("vehicle API error from {endpoint}: {message}")]
    ApiError {
        endpoint: String,
        status_code: Option<u16>,
        message: String,
    },

    /// A required field was absent from a response.
    #[error("missing field '{path}' in {endpoint} response")]
    MissingField { endpoint: String, path: String },

    /// Failed to decode a response.
    #[error("failed to parse response: {0}")]
    ParseResponse(String),

    // ==========================================================================
    // Internal errors
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LeafError {
    /// Map error to process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::LoginFailed { .. } | Self::SessionRejected { .. } => ExitCode::AuthError,

            Self::ConfigNotFound { .. }
            | Self::ConfigEmpty { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigInvalid { .. }
            | Self::Config(_) => ExitCode::ConfigError,

            Self::MissingField { .. } | Self::ParseResponse(_) => ExitCode::ParseError,

            Self::Timeout(_) => ExitCode::Timeout,

            Self::ConnectionRefused { .. }
            | Self::Network(_)
            | Self::ApiError { .. }
            | Self::Io(_)
            | Self::Json(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::LoginFailed { .. } | Self::SessionRejected { .. } => {
                ErrorCategory::Authentication
            }

            Self::Timeout(_) | Self::ConnectionRefused { .. } | Self::Network(_) => {
                ErrorCategory::Network
            }

            Self::ConfigNotFound { .. }
            | Self::ConfigEmpty { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigInvalid { .. }
            | Self::Config(_) => ErrorCategory::Configuration,

            Self::ApiError { .. } | Self::MissingField { .. } | Self::ParseResponse(_) => {
                ErrorCategory::VehicleApi
            }

            Self::Io(_) | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `LEAF-{category}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::LoginFailed { .. } => "LEAF-A001",
            Self::SessionRejected { .. } => "LEAF-A002",

            Self::Timeout(_) => "LEAF-N001",
            Self::ConnectionRefused { .. } => "LEAF-N002",
            Self::Network(_) => "LEAF-N099",

            Self::ConfigNotFound { .. } => "LEAF-C001",
            Self::ConfigEmpty { .. } => "LEAF-C002",
            Self::ConfigParse { .. } => "LEAF-C003",
            Self::ConfigInvalid { .. } => "LEAF-C004",
            Self::Config(_) => "LEAF-C099",

            Self::ApiError { .. } => "LEAF-P001",
            Self::MissingField { .. } => "LEAF-P002",
            Self::ParseResponse(_) => "LEAF-P003",

            Self::Io(_) => "LEAF-X001",
            Self::Json(_) => "LEAF-X002",
        }
    }

    /// Shorthand for a missing-setting error.
    pub fn missing_setting(section: &str, key: &str) -> Self {
        Self::ConfigInvalid {
            key: format!("{section}.{key}"),
            value: String::new(),
            message: format!("missing required key '{key}' in section [{section}]"),
        }
    }

    /// Returns actionable fix suggestions for this error.
    #[must_use]
    pub fn fix_suggestions(&self) -> Vec<FixSuggestion> {
        match self {
            Self::LoginFailed { reason } => suggestions::login_failed_suggestions(reason),
            Self::SessionRejected { message } => {
                suggestions::session_rejected_suggestions(message)
            }

            Self::Timeout(seconds) => suggestions::timeout_suggestions(*seconds),
            Self::ConnectionRefused { host } => suggestions::connection_refused_suggestions(host),
            Self::Network(msg) => vec![FixSuggestion::new(
                vec!["# Check your internet connection and api-base-url".to_string()],
                format!("Network error: {msg}."),
            )],

            Self::ConfigNotFound { path } => suggestions::config_not_found_suggestions(path),
            Self::ConfigEmpty { path } => suggestions::config_not_found_suggestions(path),
            Self::ConfigParse {
                path,
                line,
                message,
            } => suggestions::config_parse_suggestions(path, *line, message),
            Self::ConfigInvalid { key, message, .. } => {
                suggestions::config_invalid_suggestions(key, message)
            }
            Self::Config(msg) => vec![FixSuggestion::new(
                vec!["leafctl --help".to_string()],
                format!("Configuration error: {msg}"),
            )],

            Self::ApiError {
                endpoint,
                status_code,
                message,
            } => suggestions::api_error_suggestions(endpoint, *status_code, message),
            Self::MissingField { endpoint, path } => {
                suggestions::missing_field_suggestions(endpoint, path)
            }
            Self::ParseResponse(msg) => vec![FixSuggestion::new(
                vec!["leafctl --verbose <command>".to_string()],
                format!(
                    "Failed to parse vehicle API response: {msg}. This may indicate an API change."
                ),
            )],

            Self::Io(err) => vec![FixSuggestion::new(
                vec!["# Check file permissions and disk space".to_string()],
                format!("I/O error: {err}."),
            )],
            Self::Json(err) => vec![FixSuggestion::new(
                vec!["leafctl --verbose <command>".to_string()],
                format!("JSON error: {err}. The data may be corrupted."),
            )],
        }
    }
}

/// Result type alias for leafctl operations.
pub type Result<T> = std::result::Result<T, LeafError>;

// =============================================================================
// Tests
// =============================================================================
