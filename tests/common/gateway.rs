//! wiremock stand-in for the vehicle API gateway.
#![allow(dead_code)]

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Gateway path prefix, mirroring the real `/api_.../gdc/` layout.
pub const GDC_PREFIX: &str = "/gdc";

/// Base URL to put in `api-base-url` for `server`.
#[must_use]
pub fn base_url(server: &MockServer) -> String {
    format!("{}{GDC_PREFIX}/", server.uri())
}

/// Answer `POST <prefix>/<endpoint>.php` with `body`.
pub async fn mount_endpoint(server: &MockServer, endpoint: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path(format!("{GDC_PREFIX}/{endpoint}.php")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Like [`mount_endpoint`] but the request must arrive exactly `times` times.
pub async fn mount_endpoint_expect(server: &MockServer, endpoint: &str, body: Value, times: u64) {
    Mock::given(method("POST"))
        .and(path(format!("{GDC_PREFIX}/{endpoint}.php")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}
