//! Current weather and a 7-day forecast from OpenWeatherMap.

mod models;
mod service;

pub use models::{CurrentWeather, DailyForecast, TempRange, WeatherData};
pub use service::{WeatherService, condition_for_icon, light_intensity};
