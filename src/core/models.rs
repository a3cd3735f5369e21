//! Typed vehicle API responses.
//!
//! Bodies arrive as untyped JSON. Each command decodes the part it needs
//! into the structs below, so an absent key becomes a
//! [`LeafError::MissingField`] naming the field instead of a panic deep in
//! the printing code.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::core::api::Endpoint;
use crate::error::{LeafError, Result};

/// Metres per mile as used for the range estimates.
pub const METERS_PER_MILE: f64 = 1610.0;

// =============================================================================
// Decoding helpers
// =============================================================================

/// Decode the object stored under `key` in `body`.
///
/// # Errors
///
/// Returns [`LeafError::MissingField`] if `key` is absent or a nested
/// required field is missing, [`LeafError::ParseResponse`] for type errors.
pub fn decode_field<T: DeserializeOwned>(endpoint: Endpoint, body: &Value, key: &str) -> Result<T> {
    let inner = body.get(key).ok_or_else(|| LeafError::MissingField {
        endpoint: endpoint.name().to_string(),
        path: key.to_string(),
    })?;
    decode(endpoint, inner.clone(), key)
}

/// Decode a whole body.
pub fn decode_body<T: DeserializeOwned>(endpoint: Endpoint, body: &Value) -> Result<T> {
    decode(endpoint, body.clone(), "")
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, value: Value, prefix: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        let msg = e.to_string();
        if let Some(field) = missing_field_name(&msg) {
            let path = if prefix.is_empty() {
                field.to_string()
            } else {
                format!("{prefix}.{field}")
            };
            LeafError::MissingField {
                endpoint: endpoint.name().to_string(),
                path,
            }
        } else {
            LeafError::ParseResponse(format!("{endpoint}: {msg}"))
        }
    })
}

/// Extract `X` from serde's "missing field `X`" message.
fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}

/// Accept a number sent either as a JSON number or as a numeric string.
fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, got \"{s}\""))),
    }
}

/// A number as the service reported it, keeping the original text.
///
/// Serializes as the parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedNumber {
    pub value: f64,
    pub text: String,
}

impl ReportedNumber {
    /// Number whose text is the shortest rendering of `value`.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        Self {
            value,
            text: value.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for ReportedNumber {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Integer(i64),
            Float(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            #[allow(clippy::cast_precision_loss)]
            Raw::Integer(n) => Ok(Self {
                value: n as f64,
                text: n.to_string(),
            }),
            Raw::Float(n) => Ok(Self::from_value(n)),
            Raw::Text(s) => {
                let text = s.trim().to_string();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| de::Error::custom(format!("expected a number, got \"{s}\"")))?;
                Ok(Self { value, text })
            }
        }
    }
}

impl Serialize for ReportedNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value)
    }
}

// =============================================================================
// Remote climate control
// =============================================================================

/// Acknowledgement of an asynchronous remote request.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRequestAck {
    #[serde(rename = "resultKey")]
    pub result_key: String,
}

// =============================================================================
// Battery status
// =============================================================================

/// `BatteryStatusRecords` object of `BatteryStatusRecordsRequest`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatteryStatusRecords {
    pub plugin_state: String,
    pub battery_status: BatteryStatus,
    #[serde(deserialize_with = "number_or_string")]
    pub cruising_range_ac_off: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub cruising_range_ac_on: f64,
    pub target_date: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatteryStatus {
    pub battery_charging_status: String,
    #[serde(rename = "SOC")]
    pub soc: StateOfCharge,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateOfCharge {
    #[serde(deserialize_with = "number_or_string")]
    pub value: f64,
}

/// Battery report ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryReport {
    pub plugin_state: String,
    pub charging_status: String,
    pub state_of_charge_percent: f64,
    pub charge_finish: String,
    pub range_ac_off_miles: f64,
    pub range_ac_on_miles: f64,
}

impl From<BatteryStatusRecords> for BatteryReport {
    fn from(records: BatteryStatusRecords) -> Self {
        Self {
            plugin_state: records.plugin_state,
            charging_status: records.battery_status.battery_charging_status,
            state_of_charge_percent: records.battery_status.soc.value,
            charge_finish: records.target_date,
            range_ac_off_miles: meters_to_miles(records.cruising_range_ac_off),
            range_ac_on_miles: meters_to_miles(records.cruising_range_ac_on),
        }
    }
}

impl BatteryReport {
    /// Combined plug and charging status, e.g. `CONNECTED, CHARGING`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{}, {}", self.plugin_state, self.charging_status)
    }
}

/// Convert a range in metres to miles, rounded to one decimal.
#[must_use]
pub fn meters_to_miles(meters: f64) -> f64 {
    (meters / METERS_PER_MILE * 10.0).round() / 10.0
}

// =============================================================================
// Energy usage
// =============================================================================

/// `PriceSimulatorDetailInfoResponsePersonalData` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceSimulatorPersonalData {
    pub target_month: String,
    pub price_simulator_total_info: PriceSimulatorTotalInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceSimulatorTotalInfo {
    #[serde(rename = "TotalElectricMileage", deserialize_with = "number_or_string")]
    pub total_electric_mileage: f64,
    #[serde(rename = "TotalPowerConsumptMoter")]
    pub motor_kwh: ReportedNumber,
    #[serde(rename = "TotalPowerConsumptMinus")]
    pub regen_kwh: ReportedNumber,
    #[serde(rename = "TotalPowerConsumptTotal")]
    pub net_kwh: ReportedNumber,
}

/// Monthly energy report ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyReport {
    pub month: String,
    pub miles_per_kwh: f64,
    pub motor_kwh: ReportedNumber,
    pub regen_kwh: ReportedNumber,
    pub net_kwh: ReportedNumber,
    pub price_per_kwh: f64,
    pub bill_usd: f64,
}

impl EnergyReport {
    /// Build the report, pricing net consumption at `price_per_kwh`.
    #[must_use]
    pub fn new(data: PriceSimulatorPersonalData, price_per_kwh: f64) -> Self {
        let info = data.price_simulator_total_info;
        let bill_usd = price_per_kwh * info.net_kwh.value;
        Self {
            month: data.target_month,
            // The service reports mileage per Wh.
            miles_per_kwh: info.total_electric_mileage * 1000.0,
            motor_kwh: info.motor_kwh,
            regen_kwh: info.regen_kwh,
            net_kwh: info.net_kwh,
            price_per_kwh,
            bill_usd,
        }
    }
}
