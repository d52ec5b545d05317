//! Open-Elevation client

use async_trait::async_trait;
use serde::Deserialize;
use sylvan_core::{Coordinate, ElevationReading};

use crate::config::EndpointConfig;
use crate::error::ProviderError;
use crate::http::JsonClient;
use crate::provider::Provider;

#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
pub struct LookupResult {
    #[serde(default)]
    pub elevation: Option<f64>,
}

impl From<LookupResponse> for ElevationReading {
    fn from(response: LookupResponse) -> Self {
        ElevationReading {
            elevation: response.results.first().and_then(|r| r.elevation),
        }
    }
}

pub struct ElevationClient {
    http: JsonClient,
}

impl ElevationClient {
    pub fn new(endpoint: &EndpointConfig, user_agent: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            http: JsonClient::new(endpoint, user_agent)?,
        })
    }
}

#[async_trait]
impl Provider for ElevationClient {
    type Reading = ElevationReading;

    fn name(&self) -> &'static str {
        "open-elevation"
    }

    async fn try_fetch(&self, at: Coordinate) -> Result<ElevationReading, ProviderError> {
        let params = [("locations", format!("{},{}", at.lat, at.lon))];
        let response: LookupResponse = self.http.get(&params).await?;
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_result() {
        let response: LookupResponse = serde_json::from_str(
            r#"{"results": [{"latitude": 37.77, "longitude": -122.42, "elevation": 52}]}"#,
        )
        .unwrap();
        assert_eq!(ElevationReading::from(response).elevation, Some(52.0));
    }

    #[test]
    fn test_no_results_is_absent() {
        let response: LookupResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(ElevationReading::from(response).is_absent());
    }

    #[test]
    fn test_non_numeric_elevation_is_error() {
        let result = serde_json::from_str::<LookupResponse>(r#"{"results": [{"elevation": "high"}]}"#);
        assert!(result.is_err());
    }
}
