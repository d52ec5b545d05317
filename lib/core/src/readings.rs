//! Raw provider readings
//!
//! Each field is either a concrete number in the provider's native unit or
//! absent. A provider that failed entirely yields the `Default` (all-absent)
//! reading.

use serde::{Deserialize, Serialize};

/// Temperature (°C) and relative humidity (%)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateReading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

/// Elevation in meters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElevationReading {
    pub elevation: Option<f64>,
}

/// Depth-averaged soil indicators in SoilGrids units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    /// Total nitrogen, cg/kg
    pub nitrogen: Option<f64>,
    /// Soil organic carbon, dg/kg
    pub organic_carbon: Option<f64>,
}

/// Joined output of one provider fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub climate: ClimateReading,
    pub elevation: ElevationReading,
    pub soil: SoilReading,
}

impl ClimateReading {
    pub fn is_absent(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none()
    }
}

impl ElevationReading {
    pub fn is_absent(&self) -> bool {
        self.elevation.is_none()
    }
}

impl SoilReading {
    pub fn is_absent(&self) -> bool {
        self.nitrogen.is_none() && self.organic_carbon.is_none()
    }
}
