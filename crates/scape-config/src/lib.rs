//! # scape-config
//!
//! Layered configuration loading for Smellscape using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SMELLSCAPE_*` prefix, `__` as separator)
//! 2. Project-level `.smellscape/config.toml`
//! 3. User-level `~/.config/smellscape/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SMELLSCAPE_BACKEND__URL` -> `backend.url`,
//! `SMELLSCAPE_UI__SEARCH_DEBOUNCE_MS` -> `ui.search_debounce_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use scape_config::ScapeConfig;
//!
//! let config = ScapeConfig::load_with_dotenv().expect("config");
//! if config.backend.is_configured() {
//!     println!("REST root: {}", config.backend.rest_url());
//! }
//! ```

mod backend;
mod error;
mod map;
mod realtime;
mod ui;

pub use backend::BackendConfig;
pub use error::ConfigError;
pub use map::{MAX_ZOOM, MapConfig};
pub use realtime::RealtimeConfig;
pub use ui::{MAX_UI_DELAY_MS, UiConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScapeConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub realtime: RealtimeConfig,
}

impl ScapeConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".smellscape/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SMELLSCAPE_").split("__"))
    }

    /// Reject values that would make the pages misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an out-of-range zoom,
    /// coordinate, poll interval, or UI delay.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: String| ConfigError::InvalidValue {
            field: field.to_string(),
            reason,
        };
        if self.map.zoom > MAX_ZOOM {
            return Err(invalid("map.zoom", format!("must be at most {MAX_ZOOM}")));
        }
        if self.map.focus_zoom > MAX_ZOOM {
            return Err(invalid("map.focus_zoom", format!("must be at most {MAX_ZOOM}")));
        }
        if !(-90.0..=90.0).contains(&self.map.center_lat) {
            return Err(invalid("map.center_lat", "must be within [-90, 90]".into()));
        }
        if !(-180.0..=180.0).contains(&self.map.center_lng) {
            return Err(invalid("map.center_lng", "must be within [-180, 180]".into()));
        }
        if self.realtime.poll_interval_ms == 0 {
            return Err(invalid("realtime.poll_interval_ms", "must be positive".into()));
        }
        for (field, value) in [
            ("ui.search_debounce_ms", self.ui.search_debounce_ms),
            ("ui.fade_ms", self.ui.fade_ms),
        ] {
            if value > MAX_UI_DELAY_MS {
                return Err(invalid(field, format!("must be at most {MAX_UI_DELAY_MS}")));
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("smellscape").join("config.toml"))
    }
}
