//! Open-Meteo climate client
//!
//! Temperature prefers today's forecast maximum over the instantaneous
//! reading so that hot afternoons are represented rather than whatever hour
//! the request happened to land on. Humidity is the current value.

use async_trait::async_trait;
use serde::Deserialize;
use sylvan_core::{ClimateReading, Coordinate};

use crate::config::EndpointConfig;
use crate::error::ProviderError;
use crate::http::JsonClient;
use crate::provider::Provider;

#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentConditions>,
    #[serde(default)]
    pub daily: Option<DailyForecast>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
}

impl From<ForecastResponse> for ClimateReading {
    fn from(response: ForecastResponse) -> Self {
        let current = response.current.unwrap_or_default();
        let daily_max = response
            .daily
            .and_then(|d| d.temperature_2m_max.first().copied().flatten());

        ClimateReading {
            temperature: daily_max.or(current.temperature_2m),
            humidity: current.relative_humidity_2m,
        }
    }
}

pub struct ClimateClient {
    http: JsonClient,
}

impl ClimateClient {
    pub fn new(endpoint: &EndpointConfig, user_agent: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            http: JsonClient::new(endpoint, user_agent)?,
        })
    }

    fn params(at: Coordinate) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", at.lat.to_string()),
            ("longitude", at.lon.to_string()),
            ("current", "temperature_2m,relative_humidity_2m".to_string()),
            ("daily", "temperature_2m_max,temperature_2m_mean".to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", "1".to_string()),
        ]
    }
}

#[async_trait]
impl Provider for ClimateClient {
    type Reading = ClimateReading;

    fn name(&self) -> &'static str {
        "open-meteo"
    }

    async fn try_fetch(&self, at: Coordinate) -> Result<ClimateReading, ProviderError> {
        let response: ForecastResponse = self.http.get(&Self::params(at)).await?;
        Ok(response.into())
    }
}
