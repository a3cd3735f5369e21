//! HTTP forwarding adapter for the vehicle API gateway.
//!
//! Each call is a single url-encoded POST to `<base>/<Endpoint>.php`
//! carrying the region, language, and session identifiers. The JSON body is
//! returned as-is after checking its `status` field. Credential handling
//! beyond forwarding the configured values is the gateway's business.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::core::api::{Credentials, Endpoint, Session, VehicleApi};
use crate::core::http::{DEFAULT_TIMEOUT, build_client, post_form_json};
use crate::error::{LeafError, Result};
use crate::storage::ApiSettings;

/// HTTP client for the vehicle API gateway.
#[derive(Debug, Clone)]
pub struct CarwingsClient {
    client: Client,
    base_url: String,
    region_code: String,
    language: String,
    initial_app_str: String,
    timeout: Duration,
}

impl CarwingsClient {
    /// Build a client from validated API settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        Self::with_timeout(settings, DEFAULT_TIMEOUT)
    }

    /// Build a client with an explicit request timeout.
    pub fn with_timeout(settings: &ApiSettings, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            region_code: settings.region_code.clone(),
            language: settings.language.clone(),
            initial_app_str: settings.initial_app_str.clone(),
            timeout,
        })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}.php", self.base_url, endpoint.name())
    }
}

#[async_trait]
impl VehicleApi for CarwingsClient {
    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let url = self.url(Endpoint::UserLogin);
        tracing::debug!(%url, username = %credentials.username, "Sending login request");

        let form = [
            ("RegionCode", self.region_code.as_str()),
            ("lg", self.language.as_str()),
            ("initial_app_str", self.initial_app_str.as_str()),
            ("UserId", credentials.username.as_str()),
            ("Password", credentials.password.as_str()),
        ];
        let body: Value = post_form_json(&self.client, &url, &form, self.timeout).await?;

        if let Some(status) = response_status(&body)
            && status != 200
        {
            return Err(LeafError::LoginFailed {
                reason: error_message(&body)
                    .unwrap_or_else(|| format!("status {status}; check username and password")),
            });
        }

        let login: LoginResponse =
            serde_json::from_value(body).map_err(|e| LeafError::LoginFailed {
                reason: format!("unexpected login response: {e}"),
            })?;
        login.into_session()
    }

    async fn call(
        &self,
        session: &Session,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let url = self.url(endpoint);
        tracing::debug!(%url, %endpoint, "Calling vehicle API");

        let mut form: Vec<(&str, &str)> = vec![
            ("RegionCode", self.region_code.as_str()),
            ("lg", self.language.as_str()),
            ("custom_sessionid", session.session_id.as_str()),
            ("VIN", session.vin.as_str()),
        ];
        form.extend_from_slice(params);

        let body: Value = post_form_json(&self.client, &url, &form, self.timeout).await?;
        tracing::trace!(%endpoint, %body, "Vehicle API response");

        match response_status(&body) {
            Some(200) | None => Ok(body),
            Some(401) => Err(LeafError::SessionRejected {
                message: error_message(&body).unwrap_or_else(|| "status 401".to_string()),
            }),
            Some(status) => Err(LeafError::ApiError {
                endpoint: endpoint.name().to_string(),
                status_code: u16::try_from(status).ok(),
                message: error_message(&body).unwrap_or_else(|| format!("status {status}")),
            }),
        }
    }
}

/// `status` field of a response body, as a number or numeric string.
fn response_status(body: &Value) -> Option<i64> {
    match body.get("status")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn error_message(body: &Value) -> Option<String> {
    ["message", "ErrorMessage", "errorMessage"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(ToString::to_string)
}

// =============================================================================
// Login response
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LoginResponse {
    vehicle_info_list: VehicleInfoList,
    customer_info: CustomerInfo,
}

#[derive(Debug, Deserialize)]
struct VehicleInfoList {
    #[serde(rename = "vehicleInfo")]
    vehicle_info: Vec<VehicleSessionInfo>,
}

#[derive(Debug, Deserialize)]
struct VehicleSessionInfo {
    custom_sessionid: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CustomerInfo {
    vehicle_info: CustomerVehicle,
}

#[derive(Debug, Deserialize)]
struct CustomerVehicle {
    #[serde(rename = "VIN")]
    vin: String,
}

impl LoginResponse {
    fn into_session(self) -> Result<Session> {
        let session_id = self
            .vehicle_info_list
            .vehicle_info
            .into_iter()
            .next()
            .map(|info| info.custom_sessionid)
            .ok_or_else(|| LeafError::LoginFailed {
                reason: "login response lists no vehicles".to_string(),
            })?;

        Ok(Session {
            session_id,
            vin: self.customer_info.vehicle_info.vin,
        })
    }
}
