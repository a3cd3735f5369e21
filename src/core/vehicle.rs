//! Authenticated vehicle handle.
//!
//! Pairs a [`VehicleApi`] with session identifiers and exposes the typed
//! operations the commands need. Each operation is the fixed sequence of
//! remote calls the command performs; nothing is retried.

use crate::core::api::{Endpoint, Session, VehicleApi};
use crate::core::models::{
    BatteryReport, BatteryStatusRecords, EnergyReport, PriceSimulatorPersonalData,
    RemoteRequestAck, decode_body, decode_field,
};
use crate::error::Result;

/// Direction of a remote climate control request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateAction {
    On,
    Off,
}

impl ClimateAction {
    const fn endpoints(self) -> (Endpoint, Endpoint) {
        match self {
            Self::On => (Endpoint::AcRemoteRequest, Endpoint::AcRemoteResult),
            Self::Off => (Endpoint::AcRemoteOffRequest, Endpoint::AcRemoteOffResult),
        }
    }

    /// Label used in output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

/// A vehicle API client bound to a session.
pub struct Vehicle<'a> {
    api: &'a dyn VehicleApi,
    session: Session,
}

impl<'a> Vehicle<'a> {
    #[must_use]
    pub fn new(api: &'a dyn VehicleApi, session: Session) -> Self {
        Self { api, session }
    }

    /// Issue a climate control request and fetch its result once.
    ///
    /// Returns the result key of the request.
    pub async fn climate(&self, action: ClimateAction) -> Result<String> {
        let (request, result) = action.endpoints();

        let body = self.api.call(&self.session, request, &[]).await?;
        let ack: RemoteRequestAck = decode_body(request, &body)?;
        tracing::debug!(result_key = %ack.result_key, "Climate request accepted");

        self.api
            .call(&self.session, result, &[("resultKey", ack.result_key.as_str())])
            .await?;

        Ok(ack.result_key)
    }

    /// Ask the car to report, then read the latest battery records.
    pub async fn battery_status(&self) -> Result<BatteryReport> {
        self.api
            .call(&self.session, Endpoint::BatteryStatusCheckRequest, &[])
            .await?;

        let body = self
            .api
            .call(&self.session, Endpoint::BatteryStatusRecordsRequest, &[])
            .await?;
        let records: BatteryStatusRecords = decode_field(
            Endpoint::BatteryStatusRecordsRequest,
            &body,
            "BatteryStatusRecords",
        )?;

        Ok(BatteryReport::from(records))
    }

    /// Fetch the monthly energy summary and price it.
    pub async fn energy_usage(&self, price_per_kwh: f64) -> Result<EnergyReport> {
        let body = self
            .api
            .call(&self.session, Endpoint::PriceSimulatorDetailInfoRequest, &[])
            .await?;
        let data: PriceSimulatorPersonalData = decode_field(
            Endpoint::PriceSimulatorDetailInfoRequest,
            &body,
            "PriceSimulatorDetailInfoResponsePersonalData",
        )?;

        Ok(EnergyReport::new(data, price_per_kwh))
    }
}
