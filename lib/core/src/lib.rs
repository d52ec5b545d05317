//! # Sylvan Core
//!
//! Core library for the Sylvan feature aggregator.
//!
//! This crate holds everything that does not touch the network:
//!
//! - [`FeatureName`] / [`FeatureVector`] - the fixed 12-feature schema
//! - [`ProvenanceMap`] - `api` / `proxy` / `default` tag per feature
//! - [`DefaultsTable`] - training-set medians used as fallbacks
//! - [`normalize`] - SoilGrids unit conversion onto the training scale
//! - [`proxy`] - climate nitrogen, fire risk and display transforms
//! - [`assemble`] - merges readings, proxies and defaults into a [`FeatureBundle`]
//!
//! ## Example
//!
//! ```rust
//! use sylvan_core::{assemble, DefaultsTable, FeatureName, Readings, Source};
//!
//! let mut readings = Readings::default();
//! readings.climate.temperature = Some(22.0);
//! readings.climate.humidity = Some(65.0);
//!
//! let bundle = assemble(&readings, &DefaultsTable::builtin()).unwrap();
//! assert_eq!(bundle.source_of(FeatureName::Temperature), Source::Api);
//! assert_eq!(bundle.source_of(FeatureName::FireRiskIndex), Source::Proxy);
//! ```

pub mod assemble;
pub mod bundle;
pub mod coords;
pub mod defaults;
pub mod error;
pub mod feature;
pub mod normalize;
pub mod provenance;
pub mod proxy;
pub mod readings;

pub use assemble::{assemble, resolve_nitrogen, NitrogenOrigin};
pub use bundle::FeatureBundle;
pub use coords::Coordinate;
pub use defaults::DefaultsTable;
pub use error::{Error, Result};
pub use feature::{FeatureName, FeatureVector, FEATURE_COUNT};
pub use provenance::{ProvenanceMap, Source};
pub use readings::{ClimateReading, ElevationReading, Readings, SoilReading};
