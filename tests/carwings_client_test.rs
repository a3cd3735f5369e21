//! Integration tests for the gateway client against a wiremock server.
//!
//! Verifies:
//! - Login form fields and session extraction
//! - Session identifiers on every endpoint call
//! - Status handling (401, other API errors, HTTP errors)
//! - Connection failures

mod common;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leafctl::core::{CarwingsClient, Credentials, Endpoint, Session, VehicleApi};
use leafctl::error::LeafError;
use leafctl::storage::Settings;
use leafctl::test_utils::{login_body, make_test_settings_toml};

use common::gateway::{GDC_PREFIX, base_url, mount_endpoint};
use common::logger::TestLogger;

fn client_for(server: &MockServer) -> CarwingsClient {
    let toml = make_test_settings_toml(&base_url(server));
    let settings = Settings::parse(&toml, "test.toml".as_ref()).expect("settings");
    CarwingsClient::with_timeout(&settings.api, Duration::from_secs(5)).expect("client")
}

fn credentials() -> Credentials {
    Credentials {
        username: "driver@example.com".to_string(),
        password: "hunter2".to_string(),
    }
}

fn session() -> Session {
    Session {
        session_id: "sess-42".to_string(),
        vin: "SJNFAAZE0U0000001".to_string(),
    }
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn login_posts_credentials_and_returns_session() {
    let log = TestLogger::new("login_posts_credentials_and_returns_session");
    log.phase("setup");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{GDC_PREFIX}/UserLoginRequest.php")))
        .and(body_string_contains("UserId=driver%40example.com"))
        .and(body_string_contains("Password=hunter2"))
        .and(body_string_contains("RegionCode=NNA"))
        .and(body_string_contains("initial_app_str=9s5rfKVuMrT03RtzajWNcA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body("sess-42", "VIN-1")))
        .expect(1)
        .mount(&server)
        .await;

    log.phase("execute");
    let session = client_for(&server).login(&credentials()).await.expect("login");

    log.phase("verify");
    assert_eq!(session.session_id, "sess-42");
    assert_eq!(session.vin, "VIN-1");
    log.finish_ok();
}

#[tokio::test]
async fn login_with_error_status_fails() {
    let log = TestLogger::new("login_with_error_status_fails");

    let server = MockServer::start().await;
    mount_endpoint(
        &server,
        "UserLoginRequest",
        json!({"status": 404, "message": "INVALID PARAMS"}),
    )
    .await;

    let err = client_for(&server).login(&credentials()).await.unwrap_err();

    assert!(matches!(err, LeafError::LoginFailed { ref reason } if reason == "INVALID PARAMS"));
    assert_eq!(err.exit_code(), leafctl::ExitCode::AuthError);
    log.finish_ok();
}

#[tokio::test]
async fn login_with_unexpected_body_fails() {
    let server = MockServer::start().await;
    mount_endpoint(&server, "UserLoginRequest", json!({"status": 200})).await;

    let err = client_for(&server).login(&credentials()).await.unwrap_err();

    assert!(matches!(err, LeafError::LoginFailed { .. }));
}

// =============================================================================
// Endpoint calls
// =============================================================================

#[tokio::test]
async fn call_sends_session_and_params() {
    let log = TestLogger::new("call_sends_session_and_params");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{GDC_PREFIX}/ACRemoteResult.php")))
        .and(body_string_contains("custom_sessionid=sess-42"))
        .and(body_string_contains("VIN=SJNFAAZE0U0000001"))
        .and(body_string_contains("lg=en-US"))
        .and(body_string_contains("resultKey=rk-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 200})))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server)
        .call(&session(), Endpoint::AcRemoteResult, &[("resultKey", "rk-9")])
        .await
        .expect("call");

    assert_eq!(body["status"], 200);
    log.finish_ok();
}

#[tokio::test]
async fn call_without_status_returns_body() {
    let server = MockServer::start().await;
    mount_endpoint(&server, "ACRemoteRequest", json!({"resultKey": "rk"})).await;

    let body = client_for(&server)
        .call(&session(), Endpoint::AcRemoteRequest, &[])
        .await
        .expect("call");

    assert_eq!(body["resultKey"], "rk");
}

#[tokio::test]
async fn status_401_is_session_rejected() {
    let server = MockServer::start().await;
    mount_endpoint(
        &server,
        "BatteryStatusCheckRequest",
        json!({"status": 401, "message": "INVALID PARAMS"}),
    )
    .await;

    let err = client_for(&server)
        .call(&session(), Endpoint::BatteryStatusCheckRequest, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, LeafError::SessionRejected { .. }));
}

#[tokio::test]
async fn other_status_is_api_error() {
    let server = MockServer::start().await;
    mount_endpoint(
        &server,
        "PriceSimulatorDetailInfoRequest",
        json!({"status": "-2000", "ErrorMessage": "vehicle not registered"}),
    )
    .await;

    let err = client_for(&server)
        .call(&session(), Endpoint::PriceSimulatorDetailInfoRequest, &[])
        .await
        .unwrap_err();

    match err {
        LeafError::ApiError {
            endpoint,
            status_code,
            message,
        } => {
            assert_eq!(endpoint, "PriceSimulatorDetailInfoRequest");
            assert_eq!(status_code, None);
            assert_eq!(message, "vehicle not registered");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn http_error_status_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .call(&session(), Endpoint::BatteryStatusRecordsRequest, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, LeafError::Network(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn non_json_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .call(&session(), Endpoint::BatteryStatusRecordsRequest, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, LeafError::ParseResponse(_)));
}

#[tokio::test]
async fn slow_gateway_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": 200}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let toml = make_test_settings_toml(&base_url(&server));
    let settings = Settings::parse(&toml, "test.toml".as_ref()).expect("settings");
    let client =
        CarwingsClient::with_timeout(&settings.api, Duration::from_millis(200)).expect("client");

    let err = client
        .call(&session(), Endpoint::BatteryStatusCheckRequest, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, LeafError::Timeout(_)));
}
