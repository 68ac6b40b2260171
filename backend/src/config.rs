//! # Application Configuration
//!
//! Settings are read from an optional YAML file. Every field has a default,
//! so a partial file (or none at all) is valid.
//!
//! ## Lookup
//!
//! - Config file: `$PTO_CALENDAR_CONFIG`, else `{default data dir}/pto_config.yaml`
//!   if it exists, else built-in defaults
//! - Data directory: `$PTO_CALENDAR_DATA_DIR`, else `data_directory` from the
//!   config file, else `{platform data dir}/pto-calendar`
//!
//! ## YAML Format
//!
//! ```yaml
//! start_year: 2020
//! default_allowance: 20
//! holiday_country: "GR"
//! bind_address: "127.0.0.1:3000"
//! ```

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::calendar::CalendarService;
use crate::holidays::nager::DEFAULT_BASE_URL;

/// Number of years past `start_year` the user may navigate to
pub const MAX_YEAR_SPAN: i32 = 10;

pub const CONFIG_PATH_ENV: &str = "PTO_CALENDAR_CONFIG";
pub const DATA_DIR_ENV: &str = "PTO_CALENDAR_DATA_DIR";
const CONFIG_FILE_NAME: &str = "pto_config.yaml";
const DATA_DIR_NAME: &str = "pto-calendar";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Earliest year the calendar can show
    pub start_year: i32,
    /// Allowance used for years without a stored record
    pub default_allowance: u32,
    /// Year shown at startup; the current year when unset
    pub initial_year: Option<i32>,
    /// Token returned for days that are public holidays
    pub holiday_marker: String,
    /// ISO 3166-1 alpha-2 country code for the holiday lookup
    pub holiday_country: String,
    pub holiday_api_base_url: String,
    pub holiday_request_timeout_secs: u64,
    pub data_directory: Option<PathBuf>,
    pub bind_address: String,
    /// Origin allowed to call the REST API from a browser
    pub allowed_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_year: 2020,
            default_allowance: 20,
            initial_year: None,
            holiday_marker: "dot".to_string(),
            holiday_country: "GR".to_string(),
            holiday_api_base_url: DEFAULT_BASE_URL.to_string(),
            holiday_request_timeout_secs: 10,
            data_directory: None,
            bind_address: "127.0.0.1:3000".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration following the lookup order described above
    pub fn load() -> Result<Self> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from) {
            info!("Loading config from ${}: {}", CONFIG_PATH_ENV, path.display());
            return Self::from_yaml_file(&path);
        }

        let default_path = default_data_directory()?.join(CONFIG_FILE_NAME);
        if default_path.is_file() {
            info!("Loading config from {}", default_path.display());
            Self::from_yaml_file(&default_path)
        } else {
            info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&yaml_content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(yaml_content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to a mapping
        if yaml_content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AppConfig = serde_yaml::from_str(yaml_content)?;
        debug!("Parsed config: {:?}", config);
        config.validate()?;
        Ok(config)
    }

    /// Check that every navigable year can be shown by the calendar
    fn validate(&self) -> Result<()> {
        let calendar = CalendarService::new();
        let end_year = self
            .start_year
            .checked_add(MAX_YEAR_SPAN)
            .ok_or_else(|| anyhow!("start_year {} is out of range", self.start_year))?;
        if !calendar.supports_year(self.start_year) || !calendar.supports_year(end_year) {
            return Err(anyhow!(
                "start_year {} is outside the supported date range",
                self.start_year
            ));
        }
        Ok(())
    }

    /// Year to show at startup, before clamping to the navigable range
    pub fn initial_year(&self) -> i32 {
        self.initial_year.unwrap_or_else(|| Local::now().year())
    }

    /// Resolve the data directory, honouring `$PTO_CALENDAR_DATA_DIR`
    pub fn resolve_data_directory(&self) -> Result<PathBuf> {
        self.resolve_data_directory_with(env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    fn resolve_data_directory_with(&self, env_override: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = env_override {
            return Ok(path);
        }
        if let Some(path) = &self.data_directory {
            return Ok(path.clone());
        }
        default_data_directory()
    }
}

fn default_data_directory() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .ok_or_else(|| anyhow!("Could not determine the platform data directory"))
}
