//! HTTP client utilities.
//!
//! Provides the shared HTTP client and the form-POST helper used by the
//! vehicle API adapter.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::{LeafError, Result};

/// Default timeout for HTTP requests.
///
/// Remote climate and battery requests wake the car over cellular, so this
/// is generous.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Build a configured HTTP client.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(format!("leafctl/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LeafError::Network(e.to_string()))
}

/// POST url-encoded form data and decode the JSON response body.
///
/// # Errors
///
/// Returns error on network failure, non-success HTTP status, or a body
/// that is not JSON.
pub async fn post_form_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
    form: &[(&str, &str)],
    timeout: Duration,
) -> Result<T> {
    let response = client.post(url).form(form).send().await.map_err(|e| {
        if e.is_timeout() {
            LeafError::Timeout(timeout.as_secs())
        } else if e.is_connect() {
            LeafError::ConnectionRefused {
                host: url.to_string(),
            }
        } else {
            LeafError::Network(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        return Err(LeafError::Network(format!(
            "HTTP {} from {}",
            response.status(),
            url
        )));
    }

    response
        .json()
        .await
        .map_err(|e| LeafError::ParseResponse(e.to_string()))
}
