use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{KisanflowError, Result, plan::Plan};

/// Placeholder key shipped with the portal; treated the same as no key at all.
pub const DEMO_API_KEY: &str = "demo";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// store config
    pub store: StoreConfig,
    /// remote agent api
    pub agent: AgentConfig,
    /// weather provider
    pub weather: WeatherConfig,
    /// sensor provider
    pub sensor: SensorConfig,
    /// translation provider
    pub translation: TranslationConfig,
    /// page-element schema
    pub schema: SchemaConfig,
    /// subscription plan the portal starts with
    pub plan: Plan,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// store type
    pub store_type: StoreType,
    /// directory for the file store
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    #[default]
    Mem,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub base_url: String,
    /// request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: "https://chintuvignu17-rural-smart-kisan.hf.space".to_string(),
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub lat: f64,
    pub lon: f64,
    pub poll_interval_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            lat: 12.9716,
            lon: 77.5946,
            poll_interval_secs: 30 * 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub farm_id: String,
    pub poll_interval_secs: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.yoursensorprovider.com/v1".to_string(),
            farm_id: "default".to_string(),
            poll_interval_secs: 5 * 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub api_key: Option<String>,
    pub url: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: "https://translation.googleapis.com/language/translate/v2".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// custom ui schema file, the embedded one is used when absent
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).map_err(|e| KisanflowError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), e)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        Ok(config)
    }
}

/// Returns the key only when it is usable for real requests.
pub(crate) fn usable_key(key: &Option<String>) -> Option<&str> {
    key.as_deref().map(str::trim).filter(|k| !k.is_empty() && *k != DEMO_API_KEY)
}
