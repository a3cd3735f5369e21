//! Human-readable output.

use colored::Colorize;

use crate::core::models::{BatteryReport, EnergyReport};
use crate::core::vehicle::ClimateAction;
use crate::util::{format_amount, format_distance, format_percent, format_quantity};

fn heading(text: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        text.bold().to_string()
    }
}

fn value(text: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        text.cyan().to_string()
    }
}

/// Confirmation line for a climate request.
#[must_use]
pub fn render_climate(action: ClimateAction, no_color: bool) -> String {
    let line = format!("Climate control {}.", action.label());
    if no_color {
        format!("{line}\n")
    } else {
        format!("{}\n", line.green())
    }
}

/// Charge status and range estimates.
#[must_use]
pub fn render_battery(report: &BatteryReport, no_color: bool) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&heading("CHARGE STATUS:", no_color));
    out.push('\n');
    out.push_str(&format!(
        "Status: {}\n",
        value(&report.status_line(), no_color)
    ));
    out.push_str(&format!(
        "SOC: {}\n",
        value(&format_percent(report.state_of_charge_percent), no_color)
    ));
    out.push_str(&format!(
        "Charge will finish {}\n",
        value(&report.charge_finish, no_color)
    ));

    out.push('\n');
    out.push_str(&heading("RANGE ESTIMATES (miles):", no_color));
    out.push('\n');
    out.push_str(&format!(
        "Climate control OFF: {}\n",
        value(&format_distance(report.range_ac_off_miles), no_color)
    ));
    out.push_str(&format!(
        "Climate control ON: {}\n",
        value(&format_distance(report.range_ac_on_miles), no_color)
    ));

    out
}

/// Monthly energy summary and bill.
#[must_use]
pub fn render_energy(report: &EnergyReport, no_color: bool) -> String {
    let rows = [
        ("Mileage (miles/kWh)", format_quantity(report.miles_per_kwh)),
        ("Drive energy to motor (kWh)", report.motor_kwh.text.clone()),
        ("Regen energy from motor (kWh)", report.regen_kwh.text.clone()),
        ("Net energy (kWh)", report.net_kwh.text.clone()),
        ("Energy bill (USD)", format_amount(report.bill_usd)),
    ];

    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading(
        &format!("ENERGY INFO for month {}", report.month),
        no_color,
    ));
    out.push('\n');
    for (label, amount) in rows {
        out.push_str(&format!("{label}: {}\n", value(&amount, no_color)));
    }
    out
}
