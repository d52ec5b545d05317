//! Concurrent provider fan-out
//!
//! All three providers start together and are joined before returning. A
//! slow or failing provider never blocks the others, but the caller waits
//! for the slowest one (bounded by its timeout).

use std::sync::Arc;
use std::time::Instant;
use sylvan_core::{ClimateReading, Coordinate, ElevationReading, Readings, SoilReading};
use tracing::debug;

use crate::climate::ClimateClient;
use crate::config::ProviderConfig;
use crate::elevation::ElevationClient;
use crate::error::ProviderError;
use crate::provider::Provider;
use crate::soil::SoilClient;

pub type ClimateSource = dyn Provider<Reading = ClimateReading>;
pub type ElevationSource = dyn Provider<Reading = ElevationReading>;
pub type SoilSource = dyn Provider<Reading = SoilReading>;

#[derive(Clone)]
pub struct ProviderSet {
    climate: Arc<ClimateSource>,
    elevation: Arc<ElevationSource>,
    soil: Arc<SoilSource>,
}

impl ProviderSet {
    pub fn new(
        climate: Arc<ClimateSource>,
        elevation: Arc<ElevationSource>,
        soil: Arc<SoilSource>,
    ) -> Self {
        Self {
            climate,
            elevation,
            soil,
        }
    }

    /// Live HTTP clients for the configured endpoints
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self::new(
            Arc::new(ClimateClient::new(&config.climate, &config.user_agent)?),
            Arc::new(ElevationClient::new(&config.elevation, &config.user_agent)?),
            Arc::new(SoilClient::new(
                &config.soil,
                &config.user_agent,
                config.soil_calls_per_minute,
            )?),
        ))
    }

    async fn timed<T, F>(name: &'static str, fut: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        let start = Instant::now();
        let out = fut.await;
        debug!(provider = name, elapsed_ms = start.elapsed().as_millis() as u64, "provider settled");
        out
    }

    /// Query every provider concurrently. Never fails.
    pub async fn fetch_all(&self, at: Coordinate) -> Readings {
        let (climate, elevation, soil) = tokio::join!(
            Self::timed(self.climate.name(), self.climate.fetch(at)),
            Self::timed(self.elevation.name(), self.elevation.fetch(at)),
            Self::timed(self.soil.name(), self.soil.fetch(at)),
        );
        Readings {
            climate,
            elevation,
            soil,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    struct SlowClimate;

    #[async_trait]
    impl Provider for SlowClimate {
        type Reading = ClimateReading;
        fn name(&self) -> &'static str {
            "slow-climate"
        }
        async fn try_fetch(&self, _at: Coordinate) -> Result<ClimateReading, ProviderError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(ClimateReading {
                temperature: Some(18.0),
                humidity: Some(40.0),
            })
        }
    }

    struct SlowElevation;

    #[async_trait]
    impl Provider for SlowElevation {
        type Reading = ElevationReading;
        fn name(&self) -> &'static str {
            "slow-elevation"
        }
        async fn try_fetch(&self, _at: Coordinate) -> Result<ElevationReading, ProviderError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(ElevationReading {
                elevation: Some(300.0),
            })
        }
    }

    struct BrokenSoil;

    #[async_trait]
    impl Provider for BrokenSoil {
        type Reading = SoilReading;
        fn name(&self) -> &'static str {
            "broken-soil"
        }
        async fn try_fetch(&self, _at: Coordinate) -> Result<SoilReading, ProviderError> {
            Err(ProviderError::Status(503))
        }
    }

    fn set() -> ProviderSet {
        ProviderSet::new(
            Arc::new(SlowClimate),
            Arc::new(SlowElevation),
            Arc::new(BrokenSoil),
        )
    }

    #[tokio::test]
    async fn test_fetch_all_runs_concurrently() {
        let start = Instant::now();
        let readings = set().fetch_all(Coordinate::new(0.0, 0.0).unwrap()).await;
        // two 200ms providers joined, not chained
        assert!(start.elapsed() < Duration::from_millis(380));
        assert_eq!(readings.climate.temperature, Some(18.0));
        assert_eq!(readings.elevation.elevation, Some(300.0));
    }

    #[tokio::test]
    async fn test_failed_provider_is_absent() {
        let readings = set().fetch_all(Coordinate::new(0.0, 0.0).unwrap()).await;
        assert!(readings.soil.is_absent());
        assert!(!readings.climate.is_absent());
    }

    #[test]
    fn test_from_config_rejects_zero_timeout() {
        let mut config = ProviderConfig::default();
        config.elevation.timeout = Duration::ZERO;
        assert!(matches!(
            ProviderSet::from_config(&config),
            Err(ProviderError::InvalidConfig(_))
        ));
    }
}
