//! Settings file loading and session persistence.
//!
//! The settings file is a sectioned TOML document:
//!
//! ```toml
//! [nissan-api]
//! username = "me@example.com"
//! password = "secret"
//! api-timeout-mins = 30
//!
//! [data-internal]
//! last-login-time = 1700000000.0
//! session-id = "..."
//! session-vin = "..."
//!
//! [energy]
//! electric_price_dollar_per_kwh = 0.12
//! ```
//!
//! Loaded from (highest precedence first):
//! 1. `--config <PATH>`
//! 2. `LEAFCTL_CONFIG`
//! 3. `<config dir>/leafctl/config.toml`
//!
//! Only `[data-internal]` is ever changed by leafctl, and only after a login.
//! Keys and sections leafctl does not know are kept as they were.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::error::{LeafError, Result};

/// Environment variable to override the settings file path.
pub const ENV_CONFIG: &str = "LEAFCTL_CONFIG";

/// Default vehicle API endpoint root.
pub const DEFAULT_API_BASE_URL: &str = "https://gdcportalgw.its-mo.com/api_v190426_NE/gdc/";
/// Default region code (North America).
pub const DEFAULT_REGION_CODE: &str = "NNA";
/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "en-US";
/// Default application string sent with the login call.
pub const DEFAULT_INITIAL_APP_STR: &str = "9s5rfKVuMrT03RtzajWNcA";
/// Default session lifetime in minutes.
pub const DEFAULT_TIMEOUT_MINS: u64 = 30;

const SECTION_API: &str = "nissan-api";
const SECTION_ENERGY: &str = "energy";

/// Resolve the settings file path from the CLI flag, env var, or default location.
#[must_use]
pub fn resolve_settings_path(cli_path: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_path {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(ENV_CONFIG)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }
    AppPaths::new().settings_file()
}

// =============================================================================
// On-disk document
// =============================================================================

/// Raw settings document exactly as stored on disk.
///
/// Every field is optional so that missing keys surface as named
/// configuration errors from [`Settings::from_document`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsDocument {
    #[serde(rename = "nissan-api", default, skip_serializing_if = "Option::is_none")]
    pub nissan_api: Option<ApiSection>,
    #[serde(
        rename = "data-internal",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_internal: Option<SessionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<EnergySettings>,
    /// Sections leafctl does not read.
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// `[nissan-api]` section as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_timeout_mins: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_app_str: Option<String>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// Persisted session identifiers (`[data-internal]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionRecord {
    /// Seconds since the Unix epoch of the last successful login.
    #[serde(default)]
    pub last_login_time: f64,
    /// Session identifier returned by the login call.
    #[serde(default)]
    pub session_id: String,
    /// Vehicle identification number bound to the session.
    #[serde(default, rename = "session-vin")]
    pub vin: String,
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl SessionRecord {
    /// Minutes elapsed between the last login and `now`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> f64 {
        let now_secs = now.timestamp_millis() as f64 / 1000.0;
        (now_secs - self.last_login_time) / 60.0
    }

    /// Whether the session must be refreshed before use.
    ///
    /// A session is reusable while the elapsed time is at most `timeout_mins`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_stale(&self, now: DateTime<Utc>, timeout_mins: u64) -> bool {
        self.elapsed_minutes(now) > timeout_mins as f64
    }
}

/// `[energy]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electric_price_dollar_per_kwh: Option<f64>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl EnergySettings {
    /// Electricity price, required by the `energyinfo` command only.
    pub fn price_per_kwh(&self) -> Result<f64> {
        self.electric_price_dollar_per_kwh
            .ok_or_else(|| LeafError::missing_setting(SECTION_ENERGY, "electric_price_dollar_per_kwh"))
    }
}

// =============================================================================
// Validated settings
// =============================================================================

/// Validated `[nissan-api]` settings with defaults applied.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub username: String,
    pub password: String,
    pub timeout_mins: u64,
    pub base_url: String,
    pub region_code: String,
    pub language: String,
    pub initial_app_str: String,
}

/// Fully loaded settings plus the document they came from.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Validated API settings.
    pub api: ApiSettings,
    /// Current session record (default when never logged in).
    pub session: SessionRecord,
    /// Energy pricing settings.
    pub energy: EnergySettings,
    document: SettingsDocument,
}

impl Settings {
    /// Load settings from a specific path.
    ///
    /// Unlike most config loaders, a missing file is an error: the
    /// credentials cannot be defaulted.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LeafError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!(?path, "Loading settings file");
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse settings from a string; `path` is used only for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(LeafError::ConfigEmpty {
                path: path.display().to_string(),
            });
        }

        let document: SettingsDocument =
            toml::from_str(content).map_err(|e| LeafError::ConfigParse {
                path: path.display().to_string(),
                line: e
                    .span()
                    .map(|span| content[..span.start.min(content.len())].matches('\n').count() + 1),
                message: e.message().to_string(),
            })?;

        Self::from_document(document)
    }

    /// Validate a raw document and apply defaults.
    pub fn from_document(document: SettingsDocument) -> Result<Self> {
        let section = document
            .nissan_api
            .as_ref()
            .ok_or_else(|| LeafError::ConfigInvalid {
                key: SECTION_API.to_string(),
                value: String::new(),
                message: format!("missing required section [{SECTION_API}]"),
            })?;

        let username = required(section.username.as_deref(), "username")?;
        let password = required(section.password.as_deref(), "password")?;

        let base_url = section
            .api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        reqwest::Url::parse(&base_url).map_err(|e| LeafError::ConfigInvalid {
            key: format!("{SECTION_API}.api-base-url"),
            value: base_url.clone(),
            message: e.to_string(),
        })?;

        let api = ApiSettings {
            username,
            password,
            timeout_mins: section.api_timeout_mins.unwrap_or(DEFAULT_TIMEOUT_MINS),
            base_url,
            region_code: section
                .region_code
                .clone()
                .unwrap_or_else(|| DEFAULT_REGION_CODE.to_string()),
            language: section
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            initial_app_str: section
                .initial_app_str
                .clone()
                .unwrap_or_else(|| DEFAULT_INITIAL_APP_STR.to_string()),
        };

        Ok(Self {
            api,
            session: document.data_internal.clone().unwrap_or_default(),
            energy: document.energy.clone().unwrap_or_default(),
            document,
        })
    }

    /// Replace the persisted session record.
    ///
    /// Unknown keys of the previous `[data-internal]` section carry over.
    pub fn set_session(&mut self, mut record: SessionRecord) {
        if let Some(previous) = &self.document.data_internal {
            for (key, value) in &previous.extra {
                record
                    .extra
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }
        self.document.data_internal = Some(record.clone());
        self.session = record;
    }

    /// Write the settings document back to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&self.document)
            .map_err(|e| LeafError::Config(format!("Failed to serialize settings: {e}")))?;

        fs::write(path, content)?;
        tracing::debug!(?path, "Settings file saved");
        Ok(())
    }
}

fn required(value: Option<&str>, key: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(LeafError::missing_setting(SECTION_API, key)),
    }
}
