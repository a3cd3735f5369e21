//! Vehicle API seam.
//!
//! The remote telematics service is an opaque collaborator. Everything
//! leafctl needs from it goes through [`VehicleApi`]: one login call and a
//! generic endpoint call returning the raw JSON body. Typed decoding of the
//! bodies lives in [`crate::core::models`].

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Named remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    UserLogin,
    AcRemoteRequest,
    AcRemoteResult,
    AcRemoteOffRequest,
    AcRemoteOffResult,
    BatteryStatusCheckRequest,
    BatteryStatusRecordsRequest,
    PriceSimulatorDetailInfoRequest,
}

impl Endpoint {
    /// Remote name of the call (also the path stem on the HTTP gateway).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UserLogin => "UserLoginRequest",
            Self::AcRemoteRequest => "ACRemoteRequest",
            Self::AcRemoteResult => "ACRemoteResult",
            Self::AcRemoteOffRequest => "ACRemoteOffRequest",
            Self::AcRemoteOffResult => "ACRemoteOffResult",
            Self::BatteryStatusCheckRequest => "BatteryStatusCheckRequest",
            Self::BatteryStatusRecordsRequest => "BatteryStatusRecordsRequest",
            Self::PriceSimulatorDetailInfoRequest => "PriceSimulatorDetailInfoRequest",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Login credentials.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identifiers of an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Custom session id issued at login.
    pub session_id: String,
    /// VIN of the vehicle the session is bound to.
    pub vin: String,
}

/// Remote vehicle API.
///
/// Implementations perform exactly one remote round-trip per call; no
/// retries and no polling.
#[async_trait]
pub trait VehicleApi: Send + Sync {
    /// Log in with credentials and return fresh session identifiers.
    async fn login(&self, credentials: &Credentials) -> Result<Session>;

    /// Invoke `endpoint` within `session`, passing extra form `params`.
    async fn call(
        &self,
        session: &Session,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_names_match_remote_calls() {
        assert_eq!(Endpoint::AcRemoteRequest.name(), "ACRemoteRequest");
        assert_eq!(Endpoint::AcRemoteOffResult.to_string(), "ACRemoteOffResult");
        assert_eq!(
            Endpoint::PriceSimulatorDetailInfoRequest.name(),
            "PriceSimulatorDetailInfoRequest"
        );
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials {
            username: "driver".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("driver"));
        assert!(!debug.contains("hunter2"));
    }
}
