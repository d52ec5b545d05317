//! # Sylvan API
//!
//! HTTP surface for the feature aggregator. Routes:
//!
//! - `GET /api/fetch-features?lat=..&lon=..[&amplify_nitrogen=true]`
//! - `GET /api/cache/stats`
//! - `GET /health`

pub mod rest;

pub use rest::RestApi;
