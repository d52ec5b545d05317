//! Geographic coordinates

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// WGS84 point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Rejects only non-finite values. Out-of-range points are passed on to
    /// the providers, which answer with absent data.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if lat.is_finite() && lon.is_finite() {
            Ok(Self { lat, lon })
        } else {
            Err(Error::InvalidCoordinate { lat, lon })
        }
    }

    /// Inside [-90, 90] x [-180, 180]
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}
