use std::time::Duration;

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const OPEN_ELEVATION_URL: &str = "https://api.open-elevation.com/api/v1/lookup";
pub const SOILGRIDS_URL: &str = "https://rest.isric.org/soilgrids/v2.0/properties/query";

/// SoilGrids allows 5 queries per minute
pub const SOILGRIDS_CALLS_PER_MINUTE: u32 = 5;

/// One upstream endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    pub url: String,
    pub timeout: Duration,
}

impl EndpointConfig {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

/// Configuration for the three provider clients
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub climate: EndpointConfig,
    pub elevation: EndpointConfig,
    pub soil: EndpointConfig,
    pub user_agent: String,
    /// Local cap on soil calls per rolling minute; 0 disables the cap
    pub soil_calls_per_minute: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            climate: EndpointConfig::new(OPEN_METEO_URL, Duration::from_secs(6)),
            elevation: EndpointConfig::new(OPEN_ELEVATION_URL, Duration::from_secs(6)),
            soil: EndpointConfig::new(SOILGRIDS_URL, Duration::from_secs(10)),
            user_agent: format!("sylvan/{}", env!("CARGO_PKG_VERSION")),
            soil_calls_per_minute: SOILGRIDS_CALLS_PER_MINUTE,
        }
    }
}
