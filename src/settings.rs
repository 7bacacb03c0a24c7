use config::{Config, ConfigError, Environment, Source};
use serde::Deserialize;

/// Application settings read from `SHAREIT_*` environment variables.
///
/// Bind address and database URL belong to Rocket's own configuration
/// (`Rocket.toml` or `ROCKET_*`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log_filter: String,
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_source(Environment::with_prefix("SHAREIT"))
    }

    fn with_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings: Settings = Config::builder()
            .set_default("log_filter", "info")?
            .set_default("default_page_size", 10_i64)?
            .set_default("max_page_size", 100_i64)?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        if settings.default_page_size < 1 || settings.max_page_size < settings.default_page_size {
            return Err(ConfigError::Message(format!(
                "page sizes must satisfy 1 <= default ({}) <= max ({})",
                settings.default_page_size, settings.max_page_size
            )));
        }

        Ok(settings)
    }
}
