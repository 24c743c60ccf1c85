//! # basemodel-config
//!
//! Layered configuration loading for the `basemodel` tools using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BASEMODEL_*` prefix, `__` as separator)
//! 2. Project-level `.basemodel/config.toml`
//! 3. User-level `~/.config/basemodel/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `BASEMODEL_LIFECYCLE__STEP_DELAY_MS` -> `lifecycle.step_delay_ms`.
//!
//! ```no_run
//! use basemodel_config::BasemodelConfig;
//!
//! let config = BasemodelConfig::load_with_dotenv().expect("config");
//! println!("step delay: {:?}", config.lifecycle.step_delay());
//! ```

mod error;
mod general;
mod lifecycle;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use lifecycle::{LifecycleConfig, MAX_STEP_DELAY_MS};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "BASEMODEL_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BasemodelConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

impl BasemodelConfig {
    /// Load and validate configuration from TOML files and environment variables.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after applying a `.env` file from the current
    /// directory (or a parent), if any.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(error) if error.not_found() => {}
            Err(error) => tracing::warn!(%error, "failed to read .env; continuing without it"),
        }
        Self::load()
    }

    /// Extract and validate from an arbitrary provider chain.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect it or merge extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                tracing::debug!(path = %global_path.display(), "merging user config");
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".basemodel/config.toml");
        if local_path.exists() {
            tracing::debug!(path = %local_path.display(), "merging project config");
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first section that fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lifecycle.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("basemodel").join("config.toml"))
    }
}
