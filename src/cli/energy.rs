//! `energyinfo` command implementation.

use crate::cli::args::OutputFormat;
use crate::core::vehicle::Vehicle;
use crate::error::Result;
use crate::render;

/// Execute the energy command and return the rendered output.
pub async fn execute(
    vehicle: &Vehicle<'_>,
    price_per_kwh: f64,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    let report = vehicle.energy_usage(price_per_kwh).await?;
    tracing::debug!(month = %report.month, net_kwh = report.net_kwh.value, "Energy summary received");
    render::render_energy(&report, format, pretty, no_color)
}
