use std::{fmt::Debug, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{config::Config, error::GeoError};

/// Single-shot "where am I" lookup.
#[async_trait]
pub trait GeoLocator: Send + Sync + Debug {
    /// Resolve the current position as `(lat, lon)`.
    async fn current_position(&self) -> Result<(f64, f64), GeoError>;
}

/// Coarse position lookup through an ipinfo-style endpoint that reports a
/// `loc` field of the form `"lat,lon"`.
#[derive(Debug, Clone)]
pub struct IpLocator {
    http: Client,
    url: String,
}

impl IpLocator {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.geo_url.clone(), Duration::from_millis(config.timeout_ms))
    }

    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to construct HTTP client")?;

        Ok(Self { http, url })
    }
}

#[async_trait]
impl GeoLocator for IpLocator {
    async fn current_position(&self) -> Result<(f64, f64), GeoError> {
        if self.url.trim().is_empty() {
            return Err(GeoError::Unsupported);
        }

        let res = self.http.get(&self.url).send().await.map_err(|e| {
            tracing::debug!(error = %e, "geolocation lookup failed");
            GeoError::Denied
        })?;

        if !res.status().is_success() {
            tracing::debug!(status = %res.status(), "geolocation lookup refused");
            return Err(GeoError::Denied);
        }

        let lookup: IpLookup = res.json().await.map_err(|e| {
            tracing::debug!(error = %e, "geolocation response unreadable");
            GeoError::Denied
        })?;

        lookup.coordinates().ok_or(GeoError::Denied)
    }
}

#[derive(Debug, Deserialize)]
struct IpLookup {
    loc: Option<String>,
}

impl IpLookup {
    fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lon) = self.loc.as_deref()?.split_once(',')?;
        Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
    }
}
