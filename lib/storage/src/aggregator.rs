use std::sync::Arc;
use sylvan_core::{assemble, Coordinate, DefaultsTable, Error, FeatureBundle, Result, Source};
use sylvan_providers::{ProviderConfig, ProviderSet};
use tracing::{debug, info, warn};

use crate::cache::{CacheConfig, CacheStats, FeatureCache};

/// Aggregation entry point: cache lookup, provider fan-out, assembly
pub struct Aggregator {
    providers: ProviderSet,
    defaults: Arc<DefaultsTable>,
    cache: Arc<FeatureCache>,
}

impl Aggregator {
    pub fn new(providers: ProviderSet, defaults: Arc<DefaultsTable>, cache: Arc<FeatureCache>) -> Self {
        Self {
            providers,
            defaults,
            cache,
        }
    }

    /// Live providers, a fresh cache and the given defaults
    pub fn from_config(
        providers: &ProviderConfig,
        cache: CacheConfig,
        defaults: DefaultsTable,
    ) -> Result<Self> {
        defaults.validate()?;
        let providers = ProviderSet::from_config(providers)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        let cache = FeatureCache::new(cache)?;
        info!(precision = cache.precision(), "feature aggregator ready");
        Ok(Self::new(providers, Arc::new(defaults), Arc::new(cache)))
    }

    /// Complete feature bundle for a point.
    ///
    /// Provider failures never surface here; the worst case is a bundle of
    /// defaults and proxies. That includes points outside the valid lat/lon
    /// range, which the providers answer with nothing. The only errors are a
    /// schema inconsistency and a non-finite coordinate, which cannot be
    /// keyed.
    pub async fn fetch_features(&self, lat: f64, lon: f64) -> Result<FeatureBundle> {
        let at = Coordinate::new(lat, lon)?;
        if !at.in_range() {
            warn!(lat, lon, "coordinate out of range, expecting fallback values");
        }
        self.cache
            .get_or_compute(at, || async {
                let readings = self.providers.fetch_all(at).await;
                let bundle = assemble(&readings, &self.defaults)?;
                debug!(
                    lat,
                    lon,
                    api = bundle.source.count(Source::Api),
                    proxy = bundle.source.count(Source::Proxy),
                    default = bundle.source.count(Source::Default),
                    "feature bundle assembled"
                );
                Ok(bundle)
            })
            .await
    }

    #[inline]
    pub fn cache(&self) -> &Arc<FeatureCache> {
        &self.cache
    }

    #[inline]
    pub fn defaults(&self) -> &DefaultsTable {
        &self.defaults
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
