//! `climateon` / `climateoff` command implementation.

use crate::cli::args::OutputFormat;
use crate::core::vehicle::{ClimateAction, Vehicle};
use crate::error::Result;
use crate::render;

/// Execute a climate command and return the rendered output.
pub async fn execute(
    vehicle: &Vehicle<'_>,
    action: ClimateAction,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    tracing::debug!(action = action.label(), "Sending climate control request");
    let result_key = vehicle.climate(action).await?;
    render::render_climate(action, &result_key, format, pretty, no_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::Endpoint;
    use crate::test_utils::{MockVehicleApi, test_session};
    use serde_json::json;

    #[tokio::test]
    async fn climate_on_prints_confirmation() {
        let api = MockVehicleApi::new()
            .with_response(Endpoint::AcRemoteRequest, json!({"status": 200, "resultKey": "rk"}));
        let vehicle = Vehicle::new(&api, test_session());

        let output = execute(&vehicle, ClimateAction::On, OutputFormat::Human, false, true)
            .await
            .unwrap();

        assert_eq!(output, "Climate control ON.\n");
    }

    #[tokio::test]
    async fn api_error_is_propagated() {
        let api = MockVehicleApi::new().with_response(
            Endpoint::AcRemoteOffRequest,
            json!({"status": 200, "message": "no key here"}),
        );
        let vehicle = Vehicle::new(&api, test_session());

        let err = execute(&vehicle, ClimateAction::Off, OutputFormat::Human, false, true)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("resultKey"));
    }
}
