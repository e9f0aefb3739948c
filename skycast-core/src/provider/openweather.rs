use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::Config,
    error::ApiError,
    model::{LocationQuery, WeatherSnapshot},
    normalize::normalize,
};

use super::WeatherProvider;

const CURRENT_PATH: &str = "/weather";
const FORECAST_PATH: &str = "/forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// Build a provider from persisted configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?.to_owned();
        Self::new(api_key, config.base_url.clone(), Duration::from_millis(config.timeout_ms))
    }

    /// Build a provider against an explicit base URL. Tests point this at a
    /// local mock server.
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to construct HTTP client")?;

        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_owned(), http })
    }

    pub async fn fetch_by_name(&self, city: &str) -> Result<WeatherSnapshot, ApiError> {
        tracing::debug!(city, "fetching weather");
        self.fetch(&[("q", city.to_owned())]).await
    }

    pub async fn fetch_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherSnapshot, ApiError> {
        tracing::debug!(lat, lon, "fetching weather");
        self.fetch(&[("lat", lat.to_string()), ("lon", lon.to_string())]).await
    }

    /// Fetch current conditions and the 5-day forecast concurrently, then
    /// normalize the pair. If either leg fails, the first error wins.
    async fn fetch(&self, location: &[(&str, String)]) -> Result<WeatherSnapshot, ApiError> {
        let (current, forecast) = tokio::try_join!(
            self.get_json::<OwCurrent>(CURRENT_PATH, location),
            self.get_json::<OwForecast>(FORECAST_PATH, location),
        )?;

        Ok(normalize(&current, &forecast))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        location: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        // Credentials and units are appended here so every endpoint gets
        // them, whatever the location parameters look like.
        let res = self
            .http
            .get(&url)
            .query(location)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = res.status();
        let body = res.text().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), path, "weather request failed");
            return Err(ApiError::from_status(status));
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::MalformedResponse { detail: e.to_string() })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, query: &LocationQuery) -> Result<WeatherSnapshot, ApiError> {
        match query {
            LocationQuery::Name(city) => self.fetch_by_name(city).await,
            LocationQuery::Coordinates { lat, lon } => {
                self.fetch_by_coordinates(*lat, *lon).await
            }
        }
    }
}

// Wire shapes for the two REST endpoints. Only the fields the normalizer
// consumes are declared; everything else in the payload is ignored.

#[derive(Debug, Clone, Deserialize)]
pub struct OwCurrent {
    pub name: String,
    pub coord: OwCoord,
    pub sys: OwSys,
    pub main: OwMain,
    pub weather: Vec<OwCondition>,
    pub wind: OwWind,
    /// Metres.
    pub visibility: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwSys {
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwCondition {
    /// Condition group, e.g. "Clouds". Shown as the description.
    pub main: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWind {
    pub speed: f64,
    pub deg: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwForecast {
    pub list: Vec<OwForecastEntry>,
}

/// One 3-hour interval from the forecast endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastEntry {
    pub dt: i64,
    pub main: OwForecastMain,
    pub weather: Vec<OwCondition>,
    pub wind: OwWind,
    /// Probability of precipitation, `0.0..=1.0`.
    pub pop: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastMain {
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let prefix: String = body.chars().take(MAX).collect();
        format!("{prefix}...")
    } else {
        body.to_string()
    }
}
