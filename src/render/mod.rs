//! Output rendering for human and robot modes.

pub mod error;
pub mod human;
pub mod robot;

use crate::cli::args::OutputFormat;
use crate::core::models::{BatteryReport, EnergyReport};
use crate::core::vehicle::ClimateAction;
use crate::error::Result;

/// Render a climate confirmation.
pub fn render_climate(
    action: ClimateAction,
    result_key: &str,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_climate(action, no_color)),
        OutputFormat::Json => robot::render_climate_json(action, result_key, pretty),
        OutputFormat::Md => Ok(robot::render_climate_md(action, result_key)),
    }
}

/// Render battery status.
pub fn render_battery(
    report: &BatteryReport,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_battery(report, no_color)),
        OutputFormat::Json => robot::render_battery_json(report, pretty),
        OutputFormat::Md => Ok(robot::render_battery_md(report)),
    }
}

/// Render the monthly energy summary.
pub fn render_energy(
    report: &EnergyReport,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_energy(report, no_color)),
        OutputFormat::Json => robot::render_energy_json(report, pretty),
        OutputFormat::Md => Ok(robot::render_energy_md(report)),
    }
}
