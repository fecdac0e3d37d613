//! Field sensor readings from the farm's sensor provider.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    KisanflowError, Result,
    config::{SensorConfig, usable_key},
};

const DEFAULT_HISTORY_DAYS: u32 = 7;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SensorStatus {
    Good,
    Warning,
    Critical,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub name: String,
    pub value: f64,
    pub unit: String,
    /// inclusive optimal range
    pub optimal: (f64, f64),
    pub status: SensorStatus,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub timestamp: String,
}

impl SensorReading {
    pub fn in_optimal_range(&self) -> bool {
        self.value >= self.optimal.0 && self.value <= self.optimal.1
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecommendationType {
    Irrigation,
    Temperature,
    Weather,
    Pest,
    Nutrition,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub action: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SensorData {
    #[serde(default)]
    pub sensors: Vec<SensorReading>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl SensorData {
    pub fn critical(&self) -> impl Iterator<Item = &SensorReading> {
        self.sensors.iter().filter(|s| s.status == SensorStatus::Critical)
    }
}

#[derive(Debug, Clone)]
pub struct SensorService {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    farm_id: String,
}

impl SensorService {
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: usable_key(&config.api_key).map(str::to_string),
            farm_id: config.farm_id.clone(),
        }
    }

    pub fn farm_id(&self) -> &str {
        &self.farm_id
    }

    fn key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| KisanflowError::ConfigurationMissing("Please configure your sensor API key".to_string()))
    }

    /// Latest readings and recommendations for the configured farm.
    pub async fn fetch_data(&self) -> Result<SensorData> {
        let key = self.key()?;
        let url = format!("{}/farms/{}/sensors", self.base_url, self.farm_id);
        let response = self.client.get(&url).bearer_auth(key).send().await.map_err(|e| failure("real-time sensor data", e))?;
        if !response.status().is_success() {
            return Err(failure("real-time sensor data", response.status()));
        }
        response.json::<SensorData>().await.map_err(|e| failure("real-time sensor data", e))
    }

    /// Raw history for the last `days` days (7 when `None`).
    pub async fn fetch_history(
        &self,
        days: Option<u32>,
    ) -> Result<serde_json::Value> {
        let key = self.key()?;
        let url = format!("{}/farms/{}/history", self.base_url, self.farm_id);
        let days = days.unwrap_or(DEFAULT_HISTORY_DAYS);
        let response = self.client.get(&url).query(&[("days", days)]).bearer_auth(key).send().await.map_err(|e| failure("sensor history data", e))?;
        if !response.status().is_success() {
            return Err(failure("sensor history data", response.status()));
        }
        response.json::<serde_json::Value>().await.map_err(|e| failure("sensor history data", e))
    }
}

fn failure(
    what: &str,
    cause: impl std::fmt::Display,
) -> KisanflowError {
    warn!("sensor: {} request failed: {}", what, cause);
    KisanflowError::NetworkFailure(format!("Failed to fetch {}. Please check your API configuration.", what))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_configuration_missing() {
        let service = SensorService::new(&SensorConfig::default());
        assert!(matches!(service.fetch_data().await, Err(KisanflowError::ConfigurationMissing(_))));
        assert!(matches!(service.fetch_history(None).await, Err(KisanflowError::ConfigurationMissing(_))));

        let demo = SensorService::new(&SensorConfig {
            api_key: Some("demo".to_string()),
            ..Default::default()
        });
        assert!(matches!(demo.fetch_data().await, Err(KisanflowError::ConfigurationMissing(_))));
    }

    #[test]
    fn test_sensor_payload() {
        let data: SensorData = serde_json::from_value(json!({
            "sensors": [
                {"name": "Soil Moisture", "value": 22.5, "unit": "%", "optimal": [30, 60], "status": "critical", "icon": "droplet", "description": "dry", "timestamp": "2025-07-24T10:00:00Z"},
                {"name": "Soil pH", "value": 6.5, "unit": "pH", "optimal": [6, 7.5], "status": "good", "timestamp": "2025-07-24T10:00:00Z"}
            ],
            "recommendations": [
                {"type": "irrigation", "severity": "high", "title": "Irrigate", "description": "Soil is dry", "action": "Water 20mm today"}
            ]
        }))
        .unwrap();

        assert_eq!(data.critical().count(), 1);
        assert!(!data.sensors[0].in_optimal_range());
        assert!(data.sensors[1].in_optimal_range());
        assert_eq!(data.recommendations[0].kind, RecommendationType::Irrigation);
        assert!(data.recommendations[0].severity > Severity::Medium);
    }
}
