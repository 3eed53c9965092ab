//! Configuration management: defaults, validation, loading from DB + environment.

pub mod app_config;
pub mod defaults;
pub mod manager;
pub mod preferences;
pub mod validation;

pub use app_config::OverlayConfig;
pub use manager::SettingsManager;
pub use preferences::DbPreferences;
