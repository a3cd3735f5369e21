//! Test utilities for leafctl.
//!
//! Provides an in-memory [`VehicleApi`], canned gateway bodies, and
//! settings factories for use across all test modules.
//!
//! # Usage
//!
//! ```rust,ignore
//! use leafctl::test_utils::*;
//!
//! let api = MockVehicleApi::new()
//!     .with_response(Endpoint::BatteryStatusRecordsRequest, battery_records_body());
//! let dir = TestDir::new();
//! dir.create_file("config.toml", &make_test_settings_toml("http://127.0.0.1:1/gdc/"));
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::core::api::{Credentials, Endpoint, Session, VehicleApi};
use crate::error::{LeafError, Result};
use crate::storage::settings::ApiSection;
use crate::storage::{EnergySettings, SessionRecord, Settings, SettingsDocument};

// =============================================================================
// Mock vehicle API
// =============================================================================

/// A remote call recorded by [`MockVehicleApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub session: Session,
    pub params: Vec<(String, String)>,
}

/// In-memory vehicle API.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping. Endpoints without a
/// canned response answer `{"status": 200}`.
#[derive(Debug, Clone)]
pub struct MockVehicleApi {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug)]
struct MockInner {
    responses: HashMap<Endpoint, Value>,
    login: std::result::Result<Session, String>,
    logins: Vec<Credentials>,
    calls: Vec<RecordedCall>,
}

impl MockVehicleApi {
    /// Create a mock whose login succeeds with a fixed session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockInner {
                responses: HashMap::new(),
                login: Ok(test_session()),
                logins: Vec::new(),
                calls: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockInner> {
        self.inner.lock().expect("mock state poisoned")
    }

    /// Answer `endpoint` with `body`.
    #[must_use]
    pub fn with_response(self, endpoint: Endpoint, body: Value) -> Self {
        self.lock().responses.insert(endpoint, body);
        self
    }

    /// Make login return the given identifiers.
    #[must_use]
    pub fn with_login(self, session_id: &str, vin: &str) -> Self {
        self.lock().login = Ok(Session {
            session_id: session_id.to_string(),
            vin: vin.to_string(),
        });
        self
    }

    /// Make login fail with [`LeafError::LoginFailed`].
    #[must_use]
    pub fn failing_login(self, reason: &str) -> Self {
        self.lock().login = Err(reason.to_string());
        self
    }

    /// Endpoint calls in the order they were made.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of login attempts.
    #[must_use]
    pub fn login_count(&self) -> usize {
        self.lock().logins.len()
    }

    /// Credentials passed to each login attempt.
    #[must_use]
    pub fn logins(&self) -> Vec<Credentials> {
        self.lock().logins.clone()
    }
}

impl Default for MockVehicleApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleApi for MockVehicleApi {
    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let mut inner = self.lock();
        inner.logins.push(credentials.clone());
        inner
            .login
            .clone()
            .map_err(|reason| LeafError::LoginFailed { reason })
    }

    async fn call(
        &self,
        session: &Session,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let mut inner = self.lock();
        inner.calls.push(RecordedCall {
            endpoint,
            session: session.clone(),
            params: params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        });
        Ok(inner
            .responses
            .get(&endpoint)
            .cloned()
            .unwrap_or_else(|| json!({"status": 200})))
    }
}

// =============================================================================
// Test Data Factories
// =============================================================================

/// Session identifiers used by [`MockVehicleApi::new`].
#[must_use]
pub fn test_session() -> Session {
    Session {
        session_id: "test-session-id".to_string(),
        vin: "SJNFAAZE0U0000001".to_string(),
    }
}

/// Battery records body: plugged in, charging, 80% with a target date.
///
/// Ranges are 160 km and 140 km, i.e. 99.4 and 87.0 miles.
#[must_use]
pub fn battery_records_body() -> Value {
    json!({
        "status": 200,
        "BatteryStatusRecords": {
            "OperationResult": "START",
            "PluginState": "CONNECTED",
            "BatteryStatus": {
                "BatteryChargingStatus": "CHARGING",
                "BatteryCapacity": "240",
                "BatteryRemainingAmount": "192",
                "SOC": { "Value": "80" }
            },
            "CruisingRangeAcOff": "160000",
            "CruisingRangeAcOn": "140000",
            "TargetDate": "2024-01-01T00:00"
        }
    })
}

/// Price simulator body for January 2024.
#[must_use]
pub fn energy_body() -> Value {
    json!({
        "status": 200,
        "PriceSimulatorDetailInfoResponsePersonalData": {
            "TargetMonth": "202401",
            "PriceSimulatorTotalInfo": {
                "TotalNumberOfTrips": "42",
                "TotalPowerConsumptTotal": "200",
                "TotalPowerConsumptMoter": "250.5",
                "TotalPowerConsumptMinus": "50.5",
                "TotalTravelDistance": "900000",
                "TotalElectricMileage": "0.0045",
                "TotalCO2Reductiont": "100"
            }
        }
    })
}

/// Login body as returned by the gateway.
#[must_use]
pub fn login_body(session_id: &str, vin: &str) -> Value {
    json!({
        "status": 200,
        "VehicleInfoList": {
            "vehicleInfo": [{ "custom_sessionid": session_id, "vin": vin }]
        },
        "CustomerInfo": { "VehicleInfo": { "VIN": vin } }
    })
}

/// Settings with the given session record and a $0.12/kWh price.
///
/// # Panics
///
/// Panics if the built document fails validation.
#[must_use]
pub fn settings_with_session(
    timeout_mins: u64,
    login_time: DateTime<Utc>,
    session_id: &str,
    vin: &str,
) -> Settings {
    #[allow(clippy::cast_precision_loss)]
    let last_login_time = login_time.timestamp_millis() as f64 / 1000.0;
    let document = SettingsDocument {
        nissan_api: Some(ApiSection {
            username: Some("driver@example.com".to_string()),
            password: Some("hunter2".to_string()),
            api_timeout_mins: Some(timeout_mins),
            ..ApiSection::default()
        }),
        data_internal: Some(SessionRecord {
            last_login_time,
            session_id: session_id.to_string(),
            vin: vin.to_string(),
            ..SessionRecord::default()
        }),
        energy: Some(EnergySettings {
            electric_price_dollar_per_kwh: Some(0.12),
            ..EnergySettings::default()
        }),
        ..SettingsDocument::default()
    };
    Settings::from_document(document).expect("test settings are valid")
}

/// Settings file content pointing at `base_url`, never logged in.
#[must_use]
pub fn make_test_settings_toml(base_url: &str) -> String {
    format!(
        r#"[nissan-api]
username = "driver@example.com"
password = "hunter2"
api-timeout-mins = 30
api-base-url = "{base_url}"

[energy]
electric_price_dollar_per_kwh = 0.12
"#
    )
}

// =============================================================================
// Temporary Directory Helpers
// =============================================================================

/// A temporary directory for test isolation.
///
/// Automatically cleaned up when dropped.
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file with the given content, creating parents as needed.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be created or written.
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.inner.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
    }

    /// Read a file from the temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_file(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.inner.path().join(name))
    }

    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.inner.path().join(name)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

/// Check if a string contains ANSI escape sequences.
#[must_use]
pub fn has_ansi_codes(text: &str) -> bool {
    text.contains('\x1b')
}
