//! Error rendering for leafctl.
//!
//! Human output is a short block with the error code and fix suggestions;
//! robot formats get a structured JSON object.

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::error::{FixSuggestion, LeafError};

/// Render an error for stderr.
#[must_use]
pub fn render_error(error: &LeafError, format: OutputFormat, no_color: bool, pretty: bool) -> String {
    match format {
        OutputFormat::Json => render_error_json(error, pretty),
        OutputFormat::Md => render_error_json(error, true),
        OutputFormat::Human => render_text(error, no_color),
    }
}

/// Render error as structured JSON for machine consumption.
#[must_use]
pub fn render_error_json(error: &LeafError, pretty: bool) -> String {
    let error_json = ErrorJson::from_error(error);
    let rendered = if pretty {
        serde_json::to_string_pretty(&error_json)
    } else {
        serde_json::to_string(&error_json)
    };
    rendered.unwrap_or_else(|_| render_text(error, true))
}

fn render_text(error: &LeafError, no_color: bool) -> String {
    let suggestions = error.fix_suggestions();
    let mut lines = Vec::new();

    let header = format!("Error [{}]: {error}", error.error_code());
    lines.push(if no_color {
        header
    } else {
        header.red().bold().to_string()
    });

    if let Some(context) = suggestions.first().map(|s| s.context.as_str())
        && !context.is_empty()
    {
        lines.push(context.to_string());
    }

    let commands = fix_lines(&suggestions);
    if !commands.is_empty() {
        lines.push(String::new());
        lines.push("How to fix:".to_string());
        for command in commands {
            lines.push(if no_color {
                format!("  {command}")
            } else {
                format!("  {}", command.cyan())
            });
        }
    }

    if let Some(prevention) = suggestions.first().and_then(|s| s.prevention.as_ref()) {
        lines.push(String::new());
        lines.push(format!("Prevention: {prevention}"));
    }

    lines.join("\n")
}

fn fix_lines(suggestions: &[FixSuggestion]) -> Vec<&str> {
    suggestions
        .iter()
        .flat_map(|s| s.commands.iter().map(String::as_str))
        .collect()
}

#[derive(serde::Serialize)]
struct ErrorJson {
    error_code: String,
    category: String,
    message: String,
    exit_code: i32,
    suggestions: Vec<SuggestionJson>,
}

#[derive(serde::Serialize)]
struct SuggestionJson {
    commands: Vec<String>,
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prevention: Option<String>,
}

impl ErrorJson {
    fn from_error(error: &LeafError) -> Self {
        Self {
            error_code: error.error_code().to_string(),
            category: error.category().to_string(),
            message: error.to_string(),
            exit_code: error.exit_code().into(),
            suggestions: error
                .fix_suggestions()
                .into_iter()
                .map(|s| SuggestionJson {
                    commands: s.commands,
                    context: s.context,
                    prevention: s.prevention,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::has_ansi_codes;

    fn empty_config() -> LeafError {
        LeafError::ConfigEmpty {
            path: "/tmp/leaf.toml".to_string(),
        }
    }

    #[test]
    fn text_render_includes_code_and_message() {
        let output = render_error(&empty_config(), OutputFormat::Human, true, false);
        assert!(output.starts_with("Error [LEAF-C"));
        assert!(output.contains("settings file is empty: /tmp/leaf.toml"));
        assert!(output.contains("How to fix:"));
        assert!(!has_ansi_codes(&output));
    }

    #[test]
    fn json_render_is_structured() {
        let output = render_error(&empty_config(), OutputFormat::Json, false, false);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["category"], "Configuration error");
        assert_eq!(value["exit_code"], 2);
        assert!(value["error_code"].as_str().unwrap().starts_with("LEAF-C"));
        assert!(value["suggestions"].is_array());
    }

    #[test]
    fn login_failure_suggests_checking_credentials() {
        let err = LeafError::LoginFailed {
            reason: "bad password".to_string(),
        };
        let output = render_error(&err, OutputFormat::Human, true, false);
        assert!(output.contains("login failed: bad password"));
    }
}
