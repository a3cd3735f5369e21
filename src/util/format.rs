//! Number formatting utilities.

/// Format a percentage without padding decimals (`80%`, `80.5%`).
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{}%", round2(value))
}

/// Format a monetary amount with two decimals and no currency sign.
#[must_use]
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a distance with one decimal.
#[must_use]
pub fn format_distance(value: f64) -> String {
    format!("{value:.1}")
}

/// Format a measured quantity, rounded to two decimals and trimmed.
#[must_use]
pub fn format_quantity(value: f64) -> String {
    round2(value).to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
