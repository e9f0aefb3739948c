//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and its typed error taxonomy
//! - Normalization of raw payloads into one snapshot shape
//! - IP geolocation and last-result storage
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod geo;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod store;

pub use config::Config;
pub use error::{ApiError, GeoError};
pub use geo::{GeoLocator, IpLocator};
pub use model::{CurrentConditions, ForecastDay, Location, LocationQuery, WeatherSnapshot};
pub use normalize::{normalize, wind_direction};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use store::{RequestTicket, SnapshotStore};
