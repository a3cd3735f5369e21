//! Vehicle API seam, session lifecycle, and response models.

pub mod api;
pub mod carwings;
pub mod http;
pub mod logging;
pub mod models;
pub mod session;
pub mod vehicle;

pub use api::{Credentials, Endpoint, Session, VehicleApi};
pub use carwings::CarwingsClient;
pub use models::{BatteryReport, EnergyReport};
pub use session::{EstablishedSession, SessionOutcome, establish_session, open_session};
pub use vehicle::{ClimateAction, Vehicle};
