//! Feature assembly
//!
//! Merges provider readings, proxy estimates and the defaults table into one
//! complete [`FeatureBundle`]:
//!
//! 1. every feature starts at its default (`default`)
//! 2. elevation, temperature and humidity take provider values (`api`)
//! 3. soil nutrients are normalized or proxied
//! 4. fire risk is always computed (`proxy`)
//!
//! Provider absence is always resolvable. The only failure is a schema gap:
//! a feature the defaults table does not cover and nothing else produced.

use tracing::debug;

use crate::bundle::FeatureBundle;
use crate::defaults::DefaultsTable;
use crate::error::{Error, Result};
use crate::feature::{FeatureName, FeatureVector, FEATURE_COUNT};
use crate::normalize::{available_nitrogen, organic_carbon_g_per_kg, phosphorus_pair, total_nitrogen};
use crate::provenance::{ProvenanceMap, Source};
use crate::proxy::{climate_nitrogen, fire_risk, organic_carbon_nitrogen};
use crate::readings::Readings;

/// Where total nitrogen came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NitrogenOrigin {
    /// Soil provider nitrogen reading
    Soil,
    /// Soil provider organic-carbon reading via C:N ratio
    OrganicCarbon,
    /// Climate proxy on temperature, humidity and elevation
    Climate,
}

impl NitrogenOrigin {
    pub fn source(self) -> Source {
        match self {
            NitrogenOrigin::Soil => Source::Api,
            NitrogenOrigin::OrganicCarbon | NitrogenOrigin::Climate => Source::Proxy,
        }
    }
}

struct Draft {
    values: [Option<f64>; FEATURE_COUNT],
    sources: [Source; FEATURE_COUNT],
}

impl Draft {
    fn from_defaults(defaults: &DefaultsTable) -> Self {
        let mut values = [None; FEATURE_COUNT];
        for name in FeatureName::ALL {
            values[name.index()] = defaults.get(name);
        }
        Self {
            values,
            sources: [Source::Default; FEATURE_COUNT],
        }
    }

    fn set(&mut self, name: FeatureName, value: f64, source: Source) {
        self.values[name.index()] = Some(value);
        self.sources[name.index()] = source;
    }

    fn finish(self) -> Result<FeatureBundle> {
        let mut values = [0.0; FEATURE_COUNT];
        for name in FeatureName::ALL {
            values[name.index()] = self.values[name.index()].ok_or(Error::SchemaInconsistency(name))?;
        }
        Ok(FeatureBundle::new(
            FeatureVector::from_values(values),
            ProvenanceMap::from_sources(self.sources),
        ))
    }
}

/// Reading if present, otherwise the table default
fn observed_or_default(reading: Option<f64>, name: FeatureName, defaults: &DefaultsTable) -> Result<f64> {
    match reading {
        Some(v) => Ok(v),
        None => defaults.require(name),
    }
}

/// Total nitrogen and how it was obtained
pub fn resolve_nitrogen(readings: &Readings, defaults: &DefaultsTable) -> Result<(f64, NitrogenOrigin)> {
    if let Some(raw) = readings.soil.nitrogen {
        return Ok((total_nitrogen(raw), NitrogenOrigin::Soil));
    }

    if let Some(tn) = readings
        .soil
        .organic_carbon
        .map(organic_carbon_g_per_kg)
        .and_then(organic_carbon_nitrogen)
    {
        return Ok((tn, NitrogenOrigin::OrganicCarbon));
    }

    let elevation = observed_or_default(readings.elevation.elevation, FeatureName::Elevation, defaults)?;
    let temperature = observed_or_default(readings.climate.temperature, FeatureName::Temperature, defaults)?;
    let humidity = observed_or_default(readings.climate.humidity, FeatureName::Humidity, defaults)?;
    Ok((climate_nitrogen(elevation, temperature, humidity), NitrogenOrigin::Climate))
}

pub fn assemble(readings: &Readings, defaults: &DefaultsTable) -> Result<FeatureBundle> {
    let mut draft = Draft::from_defaults(defaults);

    if let Some(elevation) = readings.elevation.elevation {
        draft.set(FeatureName::Elevation, elevation, Source::Api);
    }
    if let Some(temperature) = readings.climate.temperature {
        draft.set(FeatureName::Temperature, temperature, Source::Api);
    }
    if let Some(humidity) = readings.climate.humidity {
        draft.set(FeatureName::Humidity, humidity, Source::Api);
    }

    let (tn, origin) = resolve_nitrogen(readings, defaults)?;
    debug!(?origin, soil_tn = tn, "nitrogen resolved");
    draft.set(FeatureName::SoilTn, tn, origin.source());
    draft.set(FeatureName::SoilAn, available_nitrogen(tn), origin.source());

    if let Some(raw) = readings.soil.organic_carbon {
        let (tp, ap) = phosphorus_pair(organic_carbon_g_per_kg(raw));
        draft.set(FeatureName::SoilTp, tp, Source::Api);
        draft.set(FeatureName::SoilAp, ap, Source::Api);
    }

    let temperature = observed_or_default(readings.climate.temperature, FeatureName::Temperature, defaults)?;
    let humidity = observed_or_default(readings.climate.humidity, FeatureName::Humidity, defaults)?;
    draft.set(FeatureName::FireRiskIndex, fire_risk(temperature, humidity), Source::Proxy);

    draft.finish()
}
