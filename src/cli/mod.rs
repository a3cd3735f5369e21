//! CLI argument parsing and command dispatch.

pub mod args;
pub mod battery;
pub mod climate;
pub mod energy;

use std::path::Path;

use chrono::{DateTime, Utc};

pub use args::{Cli, Commands, OutputFormat};

use crate::core::api::VehicleApi;
use crate::core::carwings::CarwingsClient;
use crate::core::session::open_session;
use crate::core::vehicle::{ClimateAction, Vehicle};
use crate::error::Result;
use crate::storage::{Settings, resolve_settings_path};

/// Output options shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub no_color: bool,
}

/// Load settings, build the HTTP client, and run `command`.
///
/// Returns the rendered command output.
pub async fn run(command: Commands, config: Option<&Path>, output: OutputOptions) -> Result<String> {
    let path = resolve_settings_path(config);
    tracing::debug!(?path, command = command.name(), "Running command");

    let mut settings = Settings::load_from(&path)?;
    let client = CarwingsClient::new(&settings.api)?;
    dispatch(command, &client, &mut settings, &path, Utc::now(), output).await
}

/// Establish a session against `api` and run `command` with it.
pub async fn dispatch(
    command: Commands,
    api: &dyn VehicleApi,
    settings: &mut Settings,
    path: &Path,
    now: DateTime<Utc>,
    output: OutputOptions,
) -> Result<String> {
    // Fail on a missing price before any remote call.
    let price = match command {
        Commands::EnergyInfo => Some(settings.energy.price_per_kwh()?),
        _ => None,
    };

    let established = open_session(api, settings, path, now).await?;
    let vehicle = Vehicle::new(api, established.session);
    let OutputOptions {
        format,
        pretty,
        no_color,
    } = output;

    match command {
        Commands::ClimateOn => {
            climate::execute(&vehicle, ClimateAction::On, format, pretty, no_color).await
        }
        Commands::ClimateOff => {
            climate::execute(&vehicle, ClimateAction::Off, format, pretty, no_color).await
        }
        Commands::BatteryInfo => battery::execute(&vehicle, format, pretty, no_color).await,
        Commands::EnergyInfo => {
            energy::execute(&vehicle, price.unwrap_or_default(), format, pretty, no_color).await
        }
    }
}
