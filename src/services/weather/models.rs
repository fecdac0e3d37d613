use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeatherData {
    pub current: CurrentWeather,
    pub forecast: Vec<DailyForecast>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    /// °C
    pub temp: i64,
    /// %
    pub humidity: i64,
    /// hPa
    pub pressure: i64,
    /// km/h
    pub wind_speed: i64,
    /// degrees
    pub wind_direction: i64,
    /// %
    pub cloud_cover: i64,
    /// km
    pub visibility: f64,
    pub uv_index: i64,
    pub description: String,
    pub icon: String,
    pub condition: String,
    /// estimated from cloud cover and time of day
    pub light_intensity: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: String,
    pub day: String,
    pub temp: TempRange,
    pub humidity: i64,
    pub description: String,
    pub icon: String,
    pub condition: String,
    /// chance of precipitation, %
    pub precipitation: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempRange {
    pub min: i64,
    pub max: i64,
}

// OpenWeatherMap payloads, only the fields that are mapped.

#[derive(Deserialize, Debug)]
pub(crate) struct OwmCurrent {
    pub main: OwmMain,
    pub wind: OwmWind,
    pub clouds: OwmClouds,
    #[serde(default)]
    pub visibility: f64,
    pub weather: Vec<OwmCondition>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct OwmMain {
    #[serde(default)]
    pub temp: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub humidity: i64,
    #[serde(default)]
    pub pressure: i64,
}

#[derive(Deserialize, Debug)]
pub(crate) struct OwmWind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<f64>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct OwmClouds {
    #[serde(default)]
    pub all: i64,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct OwmCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct OwmForecast {
    pub list: Vec<OwmForecastItem>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct OwmForecastItem {
    pub dt: i64,
    pub main: OwmMain,
    pub weather: Vec<OwmCondition>,
    #[serde(default)]
    pub pop: f64,
}
