//! Fix suggestion database for leafctl errors.
//!
//! Provides actionable fix suggestions mapped to specific error types,
//! including commands, context explanations, and prevention tips.

// =============================================================================
// Fix Suggestion Types
// =============================================================================

/// A fix suggestion for an error.
#[derive(Debug, Clone)]
pub struct FixSuggestion {
    /// Primary fix commands in order of preference.
    /// These should be copy-paste ready for the terminal.
    pub commands: Vec<String>,

    /// Explanation of why this error occurred.
    pub context: String,

    /// Tips to prevent this error in the future.
    pub prevention: Option<String>,
}

impl FixSuggestion {
    /// Creates a new fix suggestion with required fields.
    #[must_use]
    pub fn new(commands: Vec<String>, context: impl Into<String>) -> Self {
        Self {
            commands,
            context: context.into(),
            prevention: None,
        }
    }

    /// Builder: adds prevention tips.
    #[must_use]
    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.prevention = Some(prevention.into());
        self
    }
}

/// Example settings file printed when the file is missing or empty.
pub const SETTINGS_TEMPLATE: &str = r#"[nissan-api]
username = "you@example.com"
password = "your-password"
api-timeout-mins = 30

[energy]
electric_price_dollar_per_kwh = 0.12"#;

// =============================================================================
// Suggestion Generators
// =============================================================================

/// Generates fix suggestions for a rejected login.
#[must_use]
pub fn login_failed_suggestions(reason: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec!["# Verify username and password in [nissan-api]".to_string()],
            format!(
                "The vehicle API rejected the login: {reason}. The username or password \
                 in the settings file is probably wrong."
            ),
        )
        .with_prevention("Log in once with the official app to confirm the credentials work."),
    ]
}

/// Generates fix suggestions when stored session identifiers are refused.
#[must_use]
pub fn session_rejected_suggestions(message: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec!["# Set last-login-time = 0 in [data-internal] to force a fresh login".to_string()],
            format!(
                "The stored session was refused: {message}. The remote session probably \
                 expired before api-timeout-mins elapsed."
            ),
        )
        .with_prevention("Lower api-timeout-mins in [nissan-api]."),
    ]
}

/// Generates fix suggestions for timeout errors.
#[must_use]
pub fn timeout_suggestions(seconds: u64) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["leafctl --verbose <command>".to_string()],
        format!(
            "The vehicle API did not respond within {seconds}s. The car may be out of \
             cellular coverage or the service may be slow."
        ),
    )]
}

/// Generates fix suggestions for connection refused errors.
#[must_use]
pub fn connection_refused_suggestions(host: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("curl -I {host}")],
        format!("Could not connect to {host}. Check api-base-url and your network connection."),
    )]
}

/// Generates fix suggestions for a missing or empty settings file.
#[must_use]
pub fn config_not_found_suggestions(path: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![format!("mkdir -p \"$(dirname {path})\" && $EDITOR {path}")],
            format!(
                "No usable settings were found at {path}. Create it with at least:\n\n{SETTINGS_TEMPLATE}"
            ),
        )
        .with_prevention("Point --config or LEAFCTL_CONFIG at an existing settings file."),
    ]
}

/// Generates fix suggestions for settings parse errors.
#[must_use]
pub fn config_parse_suggestions(path: &str, line: Option<usize>, message: &str) -> Vec<FixSuggestion> {
    let location = line.map_or_else(String::new, |l| format!(" at line {l}"));
    vec![FixSuggestion::new(
        vec![format!("$EDITOR {path}")],
        format!(
            "The settings file could not be parsed{location}: {message}. String values \
             must be quoted."
        ),
    )]
}

/// Generates fix suggestions for invalid or missing setting values.
#[must_use]
pub fn config_invalid_suggestions(key: &str, message: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("# Set '{key}' in the settings file")],
        format!("Setting '{key}' is not usable: {message}."),
    )]
}

/// Generates fix suggestions for errors reported by the vehicle API.
#[must_use]
pub fn api_error_suggestions(
    endpoint: &str,
    status_code: Option<u16>,
    message: &str,
) -> Vec<FixSuggestion> {
    let status = status_code.map_or_else(String::new, |code| format!(" (status {code})"));
    vec![FixSuggestion::new(
        vec!["leafctl --verbose <command>".to_string()],
        format!("{endpoint} failed{status}: {message}."),
    )]
}

/// Generates fix suggestions for responses lacking a required field.
#[must_use]
pub fn missing_field_suggestions(endpoint: &str, path: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["leafctl --log-level debug <command>".to_string()],
        format!(
            "The {endpoint} response had no '{path}' field. The car may not have \
             reported yet; try again in a minute."
        ),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_includes_template() {
        let suggestions = config_not_found_suggestions("/tmp/config.toml");
        assert!(suggestions[0].context.contains("[nissan-api]"));
        assert!(suggestions[0].prevention.is_some());
    }

    #[test]
    fn api_error_mentions_status() {
        let suggestions = api_error_suggestions("ACRemoteRequest", Some(404), "not found");
        assert!(suggestions[0].context.contains("status 404"));
    }
}
