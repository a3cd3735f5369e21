//! Storage for the settings file and the persisted session record.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    ApiSettings, ENV_CONFIG, EnergySettings, SessionRecord, Settings, SettingsDocument,
    resolve_settings_path,
};
