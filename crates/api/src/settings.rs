//! Service Configuration

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use storage::DatabaseSettings;

/// Top-level service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

/// Listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Load settings from an optional `noise.toml` plus `NOISE__*`
    /// environment variables. `PG_CONNECTION_STRING`, when set, overrides
    /// the database URL directly; that is the deployment contract the
    /// container environment already uses.
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings: Settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "postgres://localhost:5432/measures")?
            .add_source(File::with_name("noise").required(false))
            .add_source(Environment::with_prefix("NOISE").separator("__"))
            .build()?
            .try_deserialize()?;

        if let Ok(url) = std::env::var("PG_CONNECTION_STRING") {
            settings.database.url = url;
        }

        Ok(settings)
    }
}
