//! # Sylvan
//!
//! Forest-health feature aggregation for a latitude/longitude point.
//!
//! Sylvan queries three public data sources concurrently (Open-Meteo climate,
//! Open-Elevation terrain, SoilGrids soil chemistry), converts soil values onto
//! the scale a downstream model was trained on, fills gaps with proxy
//! estimates or training-set medians, and returns a fixed 12-feature bundle
//! in which every value carries an `api`, `proxy` or `default` tag. Results are
//! cached per ~100 m cell.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! sylvan --http-port 8000
//! curl 'http://localhost:8000/api/fetch-features?lat=37.77&lon=-122.42'
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use sylvan::prelude::*;
//!
//! # async fn run() -> sylvan::Result<()> {
//! let aggregator = Aggregator::from_config(
//!     &ProviderConfig::default(),
//!     CacheConfig::default(),
//!     DefaultsTable::builtin(),
//! )?;
//! let bundle = aggregator.fetch_features(37.77, -122.42).await?;
//! println!("{} = {}", FeatureName::SoilTn, bundle.value(FeatureName::SoilTn));
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - `sylvan-core` - feature schema, provenance, unit normalization, proxies, assembly
//! - `sylvan-providers` - HTTP clients and the concurrent fan-out
//! - `sylvan-storage` - per-cell feature cache and the aggregator entry point
//! - `sylvan-api` - REST shell

// Re-export core types
pub use sylvan_core::{
    assemble, ClimateReading, Coordinate, DefaultsTable, ElevationReading, Error, FeatureBundle,
    FeatureName, FeatureVector, ProvenanceMap, Readings, Result, SoilReading, Source,
};

// Re-export providers
pub use sylvan_providers::{
    ClimateClient, ElevationClient, EndpointConfig, Provider, ProviderConfig, ProviderError,
    ProviderSet, SoilClient,
};

// Re-export storage
pub use sylvan_storage::{Aggregator, CacheConfig, CacheStats, FeatureCache};

// Re-export API
pub use sylvan_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Aggregator, CacheConfig, Coordinate, DefaultsTable, Error, FeatureBundle, FeatureName,
        ProviderConfig, RestApi, Result, Source,
    };
}

/// Unit conversion and proxy estimators
pub mod transform {
    pub use sylvan_core::normalize::{available_nitrogen, phosphorus_pair, round4, total_nitrogen};
    pub use sylvan_core::proxy::{amplify_nitrogen, climate_nitrogen, fire_risk};
}
