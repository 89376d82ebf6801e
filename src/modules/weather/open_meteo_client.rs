use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::core::config::WeatherConfig;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather request failed: {0}")]
    Request(String),

    #[error("Failed to parse weather response: {0}")]
    Parse(String),
}

/// Current conditions at the village
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub temperature: f64,
    pub wind_speed: f64,
    pub weather_code: i32,
    pub description: String,
    pub is_day: bool,
    pub observed_at: Option<String>,
}

/// Source of current weather for the home page
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self) -> Result<CurrentWeather, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: OpenMeteoCurrent,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
    #[serde(default)]
    is_day: Option<i32>,
    #[serde(default)]
    time: Option<String>,
}

/// Indonesian description of a WMO weather code
pub fn describe_weather_code(code: i32) -> &'static str {
    match code {
        0 => "Cerah",
        1 | 2 => "Cerah berawan",
        3 => "Berawan",
        45 | 48 => "Berkabut",
        51..=57 => "Gerimis",
        61..=67 => "Hujan",
        71..=77 => "Salju",
        80..=82 => "Hujan lokal",
        85 | 86 => "Hujan salju",
        95..=99 => "Badai petir",
        _ => "Tidak diketahui",
    }
}

/// Client for the Open-Meteo forecast API
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .user_agent("DesaPortal/0.1 (village-information-portal)")
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            latitude: config.latitude,
            longitude: config.longitude,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn current(&self) -> Result<CurrentWeather, WeatherError> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current_weather=true&timezone=Asia%2FJakarta",
            self.base_url, self.latitude, self.longitude
        );

        tracing::debug!("Fetching current weather: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Weather request failed: {:?}", e);
            WeatherError::Request(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Weather API error: HTTP {} - {}", status, body);
            return Err(WeatherError::Request(format!("HTTP {}", status)));
        }

        let forecast = response
            .json::<ForecastResponse>()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let current = forecast.current_weather;
        Ok(CurrentWeather {
            temperature: current.temperature,
            wind_speed: current.windspeed,
            weather_code: current.weathercode,
            description: describe_weather_code(current.weathercode).to_string(),
            is_day: current.is_day.unwrap_or(1) == 1,
            observed_at: current.time,
        })
    }
}
