use chrono::{DateTime, Local, Timelike};
use tracing::{debug, warn};

use crate::{
    KisanflowError, Result,
    config::{WeatherConfig, usable_key},
};

use super::models::*;

/// OpenWeatherMap returns 3-hourly entries; every 8th one is a new day.
const ENTRIES_PER_DAY: usize = 8;
const FORECAST_DAYS: usize = 7;

#[derive(Debug, Clone)]
pub struct WeatherService {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    lat: f64,
    lon: f64,
}

impl WeatherService {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: usable_key(&config.api_key).map(str::to_string),
            lat: config.lat,
            lon: config.lon,
        }
    }

    /// Whether requests go to the provider or straight to the mock dataset.
    pub fn is_live(&self) -> bool {
        self.api_key.is_some()
    }

    /// Current conditions and a 7-day forecast; the mock dataset stands in
    /// when no key is configured or the provider fails.
    pub async fn fetch(&self) -> WeatherData {
        let Some(key) = self.api_key.as_deref() else {
            debug!("weather: no api key, serving mock data");
            return WeatherData::mock();
        };

        match self.fetch_live(key).await {
            Ok(data) => data,
            Err(e) => {
                warn!("weather: provider failed, serving mock data: {}", e);
                WeatherData::mock()
            }
        }
    }

    async fn fetch_live(
        &self,
        key: &str,
    ) -> Result<WeatherData> {
        let current: OwmCurrent = self.get("weather", key).await?;
        let forecast: OwmForecast = self.get("forecast", key).await?;
        WeatherData::from_provider(current, forecast, Local::now().hour())
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        key: &str,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[("lat", self.lat.to_string()), ("lon", self.lon.to_string()), ("appid", key.to_string()), ("units", "metric".to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(KisanflowError::NetworkFailure(format!("weather {} answered {}", endpoint, response.status())));
        }
        Ok(response.json::<T>().await?)
    }
}

/// Lux-like estimate: full light between 06:00 and 18:00, a tenth outside, scaled by clear sky.
pub fn light_intensity(
    cloud_cover: i64,
    hour: u32,
) -> i64 {
    let time = if (6..=18).contains(&hour) { 1.0 } else { 0.1 };
    let clear = (100 - cloud_cover) as f64 / 100.0;
    (1000.0 * time * clear).round() as i64
}

/// Coarse condition name for an OpenWeatherMap icon code.
pub fn condition_for_icon(icon: &str) -> &'static str {
    match icon {
        "01d" => "sunny",
        "01n" => "clear",
        "02d" | "02n" => "partly-cloudy",
        "03d" | "03n" => "cloudy",
        "04d" | "04n" => "overcast",
        "09d" | "09n" | "10d" | "10n" => "rainy",
        "11d" | "11n" => "stormy",
        "13d" | "13n" => "snowy",
        "50d" | "50n" => "foggy",
        _ => "partly-cloudy",
    }
}

impl WeatherData {
    pub(crate) fn from_provider(
        current: OwmCurrent,
        forecast: OwmForecast,
        hour: u32,
    ) -> Result<Self> {
        let now = current.weather.first().cloned().ok_or_else(|| KisanflowError::Convert("weather response has no conditions".to_string()))?;

        let current = CurrentWeather {
            temp: current.main.temp.round() as i64,
            humidity: current.main.humidity,
            pressure: current.main.pressure,
            wind_speed: (current.wind.speed * 3.6).round() as i64,
            wind_direction: current.wind.deg.unwrap_or(0.0) as i64,
            cloud_cover: current.clouds.all,
            visibility: current.visibility / 1000.0,
            uv_index: 0,
            condition: condition_for_icon(&now.icon).to_string(),
            description: now.description,
            icon: now.icon,
            light_intensity: light_intensity(current.clouds.all, hour),
        };

        let forecast = forecast
            .list
            .into_iter()
            .step_by(ENTRIES_PER_DAY)
            .skip(1)
            .take(FORECAST_DAYS)
            .enumerate()
            .map(|(index, item)| daily(index, item))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            current,
            forecast,
        })
    }

    /// Fixed dataset served when the provider is unavailable.
    pub fn mock() -> Self {
        let day = |date: &str, day: &str, min: i64, max: i64, humidity: i64, description: &str, icon: &str, precipitation: f64| DailyForecast {
            date: date.to_string(),
            day: day.to_string(),
            temp: TempRange {
                min,
                max,
            },
            humidity,
            description: description.to_string(),
            icon: icon.to_string(),
            condition: condition_for_icon(icon).to_string(),
            precipitation,
        };

        Self {
            current: CurrentWeather {
                temp: 28,
                humidity: 65,
                pressure: 1013,
                wind_speed: 12,
                wind_direction: 180,
                cloud_cover: 20,
                visibility: 10.0,
                uv_index: 6,
                description: "Partly cloudy".to_string(),
                icon: "02d".to_string(),
                condition: "partly-cloudy".to_string(),
                light_intensity: 850,
            },
            forecast: vec![
                day("2025-07-25", "Tomorrow", 22, 30, 70, "Light rain", "10d", 60.0),
                day("2025-07-26", "Saturday", 24, 32, 55, "Sunny", "01d", 0.0),
                day("2025-07-27", "Sunday", 26, 35, 45, "Hot and sunny", "01d", 0.0),
                day("2025-07-28", "Monday", 23, 29, 75, "Thunderstorms", "11d", 85.0),
                day("2025-07-29", "Tuesday", 25, 31, 60, "Partly cloudy", "02d", 10.0),
                day("2025-07-30", "Wednesday", 27, 33, 50, "Clear sky", "01d", 0.0),
                day("2025-07-31", "Thursday", 24, 30, 68, "Cloudy", "03d", 20.0),
            ],
        }
    }
}

fn daily(
    index: usize,
    item: OwmForecastItem,
) -> Result<DailyForecast> {
    let date = DateTime::from_timestamp(item.dt, 0).ok_or_else(|| KisanflowError::Convert(format!("invalid forecast timestamp {}", item.dt)))?;
    let condition = item.weather.into_iter().next().ok_or_else(|| KisanflowError::Convert("forecast entry has no conditions".to_string()))?;

    Ok(DailyForecast {
        date: date.format("%Y-%m-%d").to_string(),
        day: if index == 0 {
            "Tomorrow".to_string()
        } else {
            date.format("%A").to_string()
        },
        temp: TempRange {
            min: item.main.temp_min.round() as i64,
            max: item.main.temp_max.round() as i64,
        },
        humidity: item.main.humidity,
        condition: condition_for_icon(&condition.icon).to_string(),
        description: condition.description,
        icon: condition.icon,
        precipitation: item.pop * 100.0,
    })
}
