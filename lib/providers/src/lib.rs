//! # Sylvan Providers
//!
//! Clients for the external data sources behind the feature aggregator:
//!
//! - [`ClimateClient`] - Open-Meteo temperature and relative humidity
//! - [`ElevationClient`] - Open-Elevation point lookup
//! - [`SoilClient`] - SoilGrids nitrogen and organic carbon, one batched call
//!
//! Every client implements [`Provider`]. `try_fetch` reports why a call
//! failed; `fetch` logs that reason and returns an all-absent reading, so a
//! flaky upstream never surfaces as an error to the aggregator.
//! [`ProviderSet`] runs all three concurrently and joins the results.

pub mod climate;
pub mod config;
pub mod elevation;
pub mod error;
pub mod fanout;
pub mod http;
pub mod provider;
pub mod soil;

pub use climate::ClimateClient;
pub use config::{EndpointConfig, ProviderConfig};
pub use elevation::ElevationClient;
pub use error::ProviderError;
pub use fanout::{ClimateSource, ElevationSource, ProviderSet, SoilSource};
pub use provider::Provider;
pub use soil::{RateLimit, SoilClient};
