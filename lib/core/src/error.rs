use thiserror::Error;

use crate::feature::FeatureName;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema inconsistency: feature '{0}' has no default, proxy or provider value")]
    SchemaInconsistency(FeatureName),

    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Invalid default for '{feature}': {value}")]
    InvalidDefault { feature: FeatureName, value: f64 },

    #[error("Invalid coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
