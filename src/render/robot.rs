//! Robot-mode output (JSON and Markdown).
//!
//! Provides stable, machine-readable output for scripts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::models::{BatteryReport, EnergyReport};
use crate::core::vehicle::ClimateAction;
use crate::error::Result;

/// Schema identifier carried by every JSON envelope.
pub const SCHEMA_VERSION: &str = "leafctl.v1";

/// JSON envelope for command output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotOutput<T> {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub command: String,
    pub data: T,
}

impl<T> RobotOutput<T> {
    /// Wrap `data` produced by `command`.
    pub fn new(command: impl Into<String>, data: T) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            command: command.into(),
            data,
        }
    }
}

/// Result of a climate request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateResult {
    pub climate_control: &'static str,
    pub result_key: String,
}

/// Render any envelope as JSON.
pub fn render_json<T: Serialize>(output: &T, pretty: bool) -> Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(output)?)
    } else {
        Ok(serde_json::to_string(output)?)
    }
}

pub fn render_climate_json(action: ClimateAction, result_key: &str, pretty: bool) -> Result<String> {
    let command = match action {
        ClimateAction::On => "climateon",
        ClimateAction::Off => "climateoff",
    };
    let output = RobotOutput::new(
        command,
        ClimateResult {
            climate_control: action.label(),
            result_key: result_key.to_string(),
        },
    );
    render_json(&output, pretty)
}

pub fn render_battery_json(report: &BatteryReport, pretty: bool) -> Result<String> {
    render_json(&RobotOutput::new("batteryinfo", report), pretty)
}

pub fn render_energy_json(report: &EnergyReport, pretty: bool) -> Result<String> {
    render_json(&RobotOutput::new("energyinfo", report), pretty)
}

/// Render a climate confirmation as Markdown.
#[must_use]
pub fn render_climate_md(action: ClimateAction, result_key: &str) -> String {
    format!(
        "## Climate control\n- state: {}\n- result_key: {result_key}\n",
        action.label()
    )
}

/// Render battery status as Markdown.
#[must_use]
pub fn render_battery_md(report: &BatteryReport) -> String {
    let mut output = String::from("## Charge status\n");
    output.push_str(&format!("- plugin: {}\n", report.plugin_state));
    output.push_str(&format!("- charging: {}\n", report.charging_status));
    output.push_str(&format!("- soc: {}%\n", report.state_of_charge_percent));
    output.push_str(&format!("- charge_finish: {}\n", report.charge_finish));
    output.push_str("\n## Range estimates (miles)\n");
    output.push_str(&format!("- climate_off: {:.1}\n", report.range_ac_off_miles));
    output.push_str(&format!("- climate_on: {:.1}\n", report.range_ac_on_miles));
    output
}

/// Render the energy summary as Markdown.
#[must_use]
pub fn render_energy_md(report: &EnergyReport) -> String {
    let mut output = format!("## Energy info ({})\n", report.month);
    output.push_str("| Metric | Value |\n|---|---|\n");
    output.push_str(&format!("| Mileage (miles/kWh) | {:.2} |\n", report.miles_per_kwh));
    output.push_str(&format!("| Motor (kWh) | {} |\n", report.motor_kwh.text));
    output.push_str(&format!("| Regen (kWh) | {} |\n", report.regen_kwh.text));
    output.push_str(&format!("| Net (kWh) | {} |\n", report.net_kwh.text));
    output.push_str(&format!("| Bill (USD) | {:.2} |\n", report.bill_usd));
    output
}
