use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    error::ApiError,
    model::{LocationQuery, WeatherSnapshot},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of normalized weather snapshots.
///
/// Implementations resolve a [`LocationQuery`] into a [`WeatherSnapshot`],
/// classifying every failure into an [`ApiError`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, query: &LocationQuery) -> Result<WeatherSnapshot, ApiError>;
}
