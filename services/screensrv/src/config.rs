//! Persisted link configuration (`config.json`)
//!
//! ```json
//! { "portSearchAttribute": "CH340", "minPosition": 0, "maxPosition": 2680 }
//! ```
//!
//! Read once at startup. A missing file is created with the defaults; keys
//! missing from an existing file fall back to the defaults as well.

use std::path::Path;

use figment::{
    providers::{Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ScreenSrvError};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Default HTTP bind address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Sensor range and port discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkConfig {
    /// Substring of the serial port description identifying the sensor adapter
    pub port_search_attribute: String,
    /// Raw count reported with the screen fully retracted (0 %)
    pub min_position: i64,
    /// Raw count reported with the screen fully extended (100 %)
    pub max_position: i64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port_search_attribute: "CH340".to_string(),
            min_position: 0,
            max_position: 2680,
        }
    }
}

impl LinkConfig {
    /// Check `maxPosition > minPosition`
    pub fn validate(&self) -> Result<()> {
        if self.max_position <= self.min_position {
            return Err(ScreenSrvError::config(format!(
                "maxPosition ({}) must be greater than minPosition ({})",
                self.max_position, self.min_position
            )));
        }
        Ok(())
    }

    /// Load `path`, writing the defaults first if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::default().save(path)?;
            info!("Created default configuration at {}", path.display());
        }
        Self::load(path)
    }

    /// Load and validate an existing configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ScreenSrvError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let config: LinkConfig = Figment::from(Serialized::defaults(LinkConfig::default()))
            .merge(Json::file(path))
            .extract()
            .map_err(|e| {
                ScreenSrvError::config(format!("Failed to load {}: {}", path.display(), e))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
