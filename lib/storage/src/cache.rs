//! Per-cell feature cache
//!
//! Bundles are keyed by the coordinate rounded to a fixed number of decimal
//! places (3 by default, roughly 100 m). Two points in the same cell share an
//! entry; that is intentional quantization, not a collision. Entries live for
//! the lifetime of the cache: there is no TTL and no eviction.

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use sylvan_core::{Coordinate, Error, FeatureBundle, Result};
use tracing::debug;

/// Default key precision in decimal places
pub const DEFAULT_PRECISION: u32 = 3;
/// Highest supported precision (~0.1 m cells)
pub const MAX_PRECISION: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Decimal places kept in the cache key
    pub precision: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Quantized coordinate. Stored as integer cell indices so that `-0.0`
/// and `0.0` land in the same cell and hashing is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    lat: i64,
    lon: i64,
}

impl CellKey {
    /// Halves round away from zero (`f64::round`), not to even, so a point
    /// exactly on a cell boundary always moves outward.
    pub fn new(at: Coordinate, precision: u32) -> Self {
        let scale = 10f64.powi(precision as i32);
        Self {
            lat: (at.lat * scale).round() as i64,
            lon: (at.lon * scale).round() as i64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub precision: u32,
}

pub struct FeatureCache {
    entries: RwLock<AHashMap<CellKey, FeatureBundle>>,
    precision: u32,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FeatureCache {
    pub fn new(config: CacheConfig) -> Result<Self> {
        if config.precision > MAX_PRECISION {
            return Err(Error::InvalidConfig(format!(
                "cache precision {} exceeds {}",
                config.precision, MAX_PRECISION
            )));
        }
        Ok(Self {
            entries: RwLock::new(AHashMap::new()),
            precision: config.precision,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    #[inline]
    pub fn key(&self, at: Coordinate) -> CellKey {
        CellKey::new(at, self.precision)
    }

    pub fn get(&self, at: Coordinate) -> Option<FeatureBundle> {
        self.entries.read().get(&self.key(at)).copied()
    }

    #[inline]
    pub fn contains(&self, at: Coordinate) -> bool {
        self.entries.read().contains_key(&self.key(at))
    }

    /// Store `bundle` unless the cell is already filled. Returns whichever
    /// bundle the cell holds afterwards, so racing writers agree on one value.
    pub fn insert(&self, at: Coordinate, bundle: FeatureBundle) -> FeatureBundle {
        *self.entries.write().entry(self.key(at)).or_insert(bundle)
    }

    /// Cached bundle for the cell, or the result of `compute` stored under it.
    ///
    /// `compute` runs outside the lock, so concurrent first requests for the
    /// same cold cell may both compute; the first insert wins. Errors from
    /// `compute` are returned and nothing is cached.
    pub async fn get_or_compute<F, Fut, E>(&self, at: Coordinate, compute: F) -> std::result::Result<FeatureBundle, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<FeatureBundle, E>>,
    {
        let key = self.key(at);
        let cached = self.entries.read().get(&key).copied();
        if let Some(bundle) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(lat = at.lat, lon = at.lon, "feature cache hit");
            return Ok(bundle);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(lat = at.lat, lon = at.lon, "feature cache miss");
        let bundle = compute().await?;
        Ok(*self.entries.write().entry(key).or_insert(bundle))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every entry and reset counters
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            precision: self.precision,
        }
    }
}

impl Default for FeatureCache {
    fn default() -> Self {
        Self {
            entries: RwLock::new(AHashMap::new()),
            precision: DEFAULT_PRECISION,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sylvan_core::{assemble, DefaultsTable, FeatureName, Readings};

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn bundle_with_temperature(t: f64) -> FeatureBundle {
        let mut readings = Readings::default();
        readings.climate.temperature = Some(t);
        assemble(&readings, &DefaultsTable::builtin()).unwrap()
    }

    #[test]
    fn test_quantization() {
        let a = CellKey::new(coord(10.0001, 20.0001), 3);
        let b = CellKey::new(coord(10.0004, 20.0002), 3);
        assert_eq!(a, b);

        let c = CellKey::new(coord(10.0006, 20.0001), 3);
        assert_ne!(a, c);
    }

    #[test]
    fn test_signed_zero_shares_cell() {
        assert_eq!(CellKey::new(coord(-0.0004, 0.0), 3), CellKey::new(coord(0.0001, -0.0), 3));
    }

    #[test]
    fn test_boundary_rounds_away_from_zero() {
        let key = CellKey::new(coord(2.5, -2.5), 0);
        assert_eq!(key, CellKey { lat: 3, lon: -3 });
        assert_ne!(key, CellKey::new(coord(2.0, -2.0), 0));
    }

    #[test]
    fn test_precision_changes_cell_size() {
        let a = coord(10.01, 20.0);
        let b = coord(10.04, 20.0);
        assert_eq!(CellKey::new(a, 1), CellKey::new(b, 1));
        assert_ne!(CellKey::new(a, 2), CellKey::new(b, 2));
    }

    #[test]
    fn test_rejects_excessive_precision() {
        assert!(FeatureCache::new(CacheConfig { precision: 7 }).is_err());
        assert!(FeatureCache::new(CacheConfig { precision: 0 }).is_ok());
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = FeatureCache::default();
        let at = coord(1.0, 2.0);
        let first = cache.insert(at, bundle_with_temperature(10.0));
        let second = cache.insert(coord(1.0002, 2.0), bundle_with_temperature(30.0));
        assert_eq!(first, second);
        assert_eq!(second.value(FeatureName::Temperature), 10.0);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_get_or_compute_memoizes() {
        let cache = FeatureCache::default();
        let at = coord(45.5, -73.6);
        let mut calls = 0;

        let first = cache
            .get_or_compute(at, || {
                calls += 1;
                async { Ok::<_, Error>(bundle_with_temperature(12.0)) }
            })
            .await
            .unwrap();
        let second = cache
            .get_or_compute(coord(45.5004, -73.6001), || {
                calls += 1;
                async { Ok::<_, Error>(bundle_with_temperature(99.0)) }
            })
            .await
            .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(first, second);
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_compute_error_not_cached() {
        let cache = FeatureCache::default();
        let at = coord(3.0, 4.0);
        let result = cache
            .get_or_compute(at, || async {
                Err::<FeatureBundle, _>(Error::SchemaInconsistency(FeatureName::Slope))
            })
            .await;
        assert!(result.is_err());
        assert!(!cache.contains(at));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_resets() {
        let cache = FeatureCache::default();
        cache.insert(coord(1.0, 1.0), bundle_with_temperature(5.0));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 0);
    }
}
