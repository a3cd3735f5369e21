//! `batteryinfo` command implementation.

use crate::cli::args::OutputFormat;
use crate::core::vehicle::Vehicle;
use crate::error::Result;
use crate::render;

/// Execute the battery command and return the rendered output.
pub async fn execute(
    vehicle: &Vehicle<'_>,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    let report = vehicle.battery_status().await?;
    tracing::debug!(soc = report.state_of_charge_percent, "Battery status received");
    render::render_battery(&report, format, pretty, no_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::Endpoint;
    use crate::error::LeafError;
    use crate::test_utils::{MockVehicleApi, battery_records_body, test_session};
    use serde_json::json;

    #[tokio::test]
    async fn prints_charge_and_range() {
        let api = MockVehicleApi::new()
            .with_response(Endpoint::BatteryStatusRecordsRequest, battery_records_body());
        let vehicle = Vehicle::new(&api, test_session());

        let output = execute(&vehicle, OutputFormat::Human, false, true).await.unwrap();

        assert!(output.contains("SOC: 80%"));
        assert!(output.contains("Climate control OFF: 99.4"));
        assert!(output.contains("Climate control ON: 87.0"));
    }

    #[tokio::test]
    async fn missing_records_is_a_decode_error() {
        let api = MockVehicleApi::new()
            .with_response(Endpoint::BatteryStatusRecordsRequest, json!({"status": 200}));
        let vehicle = Vehicle::new(&api, test_session());

        let err = execute(&vehicle, OutputFormat::Human, false, true)
            .await
            .unwrap_err();

        assert!(
            matches!(err, LeafError::MissingField { ref path, .. } if path == "BatteryStatusRecords")
        );
    }
}
