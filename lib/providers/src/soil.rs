//! SoilGrids client
//!
//! Nitrogen and organic carbon are requested in a single batched query since
//! the service allows only a handful of calls per minute. Each layer reports
//! one value per depth interval; the reading is the mean across depths.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use sylvan_core::{Coordinate, SoilReading};

use crate::config::EndpointConfig;
use crate::error::ProviderError;
use crate::http::JsonClient;
use crate::provider::Provider;

#[derive(Debug, Default, Deserialize)]
pub struct SoilResponse {
    #[serde(default)]
    pub properties: Option<SoilProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SoilProperties {
    #[serde(default)]
    pub layers: Vec<SoilLayer>,
}

#[derive(Debug, Deserialize)]
pub struct SoilLayer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub depths: Vec<SoilDepth>,
}

#[derive(Debug, Deserialize)]
pub struct SoilDepth {
    #[serde(default)]
    pub values: DepthValues,
}

#[derive(Debug, Default, Deserialize)]
pub struct DepthValues {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default, rename = "Q0.5")]
    pub median: Option<f64>,
}

impl SoilLayer {
    /// Mean over depths, using the median where the mean is missing
    fn depth_mean(&self) -> Option<f64> {
        let vals: Vec<f64> = self
            .depths
            .iter()
            .filter_map(|d| d.values.mean.or(d.values.median))
            .collect();
        if vals.is_empty() {
            None
        } else {
            Some(vals.iter().sum::<f64>() / vals.len() as f64)
        }
    }
}

impl From<SoilResponse> for SoilReading {
    fn from(response: SoilResponse) -> Self {
        let mut reading = SoilReading::default();
        let layers = response.properties.map(|p| p.layers).unwrap_or_default();

        for layer in &layers {
            let name = layer.name.as_deref().unwrap_or_default().to_lowercase();
            let Some(value) = layer.depth_mean() else {
                continue;
            };
            if name.contains("nitrogen") || name.contains("n_total") {
                reading.nitrogen = Some(value);
            } else if name.contains("soc") || name.contains("organic_carbon") {
                reading.organic_carbon = Some(value);
            }
        }
        reading
    }
}

/// Rolling-window call budget
pub struct RateLimit {
    max_calls: u32,
    window: Duration,
    calls: Mutex<VecDeque<Instant>>,
}

impl RateLimit {
    pub fn new(max_calls: u32, window: Duration) -> Self {
        Self {
            max_calls,
            window,
            calls: Mutex::new(VecDeque::new()),
        }
    }

    pub fn per_minute(max_calls: u32) -> Self {
        Self::new(max_calls, Duration::from_secs(60))
    }

    /// Claim a slot if one is free in the current window
    pub fn try_acquire(&self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    fn try_acquire_at(&self, now: Instant) -> bool {
        let mut calls = self.calls.lock();
        while calls
            .front()
            .is_some_and(|t| now.duration_since(*t) >= self.window)
        {
            calls.pop_front();
        }
        if calls.len() >= self.max_calls as usize {
            return false;
        }
        calls.push_back(now);
        true
    }
}

pub struct SoilClient {
    http: JsonClient,
    limit: Option<RateLimit>,
}

impl SoilClient {
    /// `calls_per_minute == 0` disables the local cap
    pub fn new(
        endpoint: &EndpointConfig,
        user_agent: &str,
        calls_per_minute: u32,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http: JsonClient::new(endpoint, user_agent)?,
            limit: (calls_per_minute > 0).then(|| RateLimit::per_minute(calls_per_minute)),
        })
    }

    fn params(at: Coordinate) -> [(&'static str, String); 4] {
        [
            ("lat", at.lat.to_string()),
            ("lon", at.lon.to_string()),
            ("property", "nitrogen".to_string()),
            ("property", "soc".to_string()),
        ]
    }
}

#[async_trait]
impl Provider for SoilClient {
    type Reading = SoilReading;

    fn name(&self) -> &'static str {
        "soilgrids"
    }

    async fn try_fetch(&self, at: Coordinate) -> Result<SoilReading, ProviderError> {
        if let Some(limit) = &self.limit {
            if !limit.try_acquire() {
                return Err(ProviderError::RateLimited);
            }
        }
        let response: SoilResponse = self.http.get(&Self::params(at)).await?;
        Ok(response.into())
    }
}
