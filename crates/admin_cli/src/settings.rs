//! Handles settings for the admin binary. Configuration is read from an
//! optional `hearth.toml` next to the working directory, overridable via
//! `HEARTH_*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub database_url: Option<String>,
    pub currency: Option<String>,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("hearth").required(false))
            .add_source(Environment::with_prefix("HEARTH"))
            .build()?;

        settings.try_deserialize()
    }
}
