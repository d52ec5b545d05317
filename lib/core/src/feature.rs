//! Fixed feature schema
//!
//! Twelve named environmental, soil and geographic attributes. The order of
//! [`FeatureName::ALL`] is the model's column order.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Number of features in the fixed schema
pub const FEATURE_COUNT: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureName {
    Slope,
    Elevation,
    Temperature,
    Humidity,
    SoilTn,
    SoilTp,
    SoilAp,
    SoilAn,
    MenhinickIndex,
    GleasonIndex,
    DisturbanceLevel,
    FireRiskIndex,
}

impl FeatureName {
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::Slope,
        FeatureName::Elevation,
        FeatureName::Temperature,
        FeatureName::Humidity,
        FeatureName::SoilTn,
        FeatureName::SoilTp,
        FeatureName::SoilAp,
        FeatureName::SoilAn,
        FeatureName::MenhinickIndex,
        FeatureName::GleasonIndex,
        FeatureName::DisturbanceLevel,
        FeatureName::FireRiskIndex,
    ];

    /// Position in the schema
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase, underscore-separated key used in bundles
    pub fn key(self) -> &'static str {
        match self {
            FeatureName::Slope => "slope",
            FeatureName::Elevation => "elevation",
            FeatureName::Temperature => "temperature",
            FeatureName::Humidity => "humidity",
            FeatureName::SoilTn => "soil_tn",
            FeatureName::SoilTp => "soil_tp",
            FeatureName::SoilAp => "soil_ap",
            FeatureName::SoilAn => "soil_an",
            FeatureName::MenhinickIndex => "menhinick_index",
            FeatureName::GleasonIndex => "gleason_index",
            FeatureName::DisturbanceLevel => "disturbance_level",
            FeatureName::FireRiskIndex => "fire_risk_index",
        }
    }

    /// Column name the prediction model was trained with
    pub fn model_name(self) -> &'static str {
        match self {
            FeatureName::Slope => "Slope",
            FeatureName::Elevation => "Elevation",
            FeatureName::Temperature => "Temperature",
            FeatureName::Humidity => "Humidity",
            FeatureName::SoilTn => "Soil_TN",
            FeatureName::SoilTp => "Soil_TP",
            FeatureName::SoilAp => "Soil_AP",
            FeatureName::SoilAn => "Soil_AN",
            FeatureName::MenhinickIndex => "Menhinick_Index",
            FeatureName::GleasonIndex => "Gleason_Index",
            FeatureName::DisturbanceLevel => "Disturbance_Level",
            FeatureName::FireRiskIndex => "Fire_Risk_Index",
        }
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accepts both the bundle key (`soil_tn`) and the model column (`Soil_TN`).
impl FromStr for FeatureName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureName::ALL
            .iter()
            .copied()
            .find(|f| f.key() == s || f.model_name() == s)
            .ok_or_else(|| Error::UnknownFeature(s.to_string()))
    }
}

impl Serialize for FeatureName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for FeatureName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Complete feature vector. Every schema entry holds a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub(crate) fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    #[inline]
    pub fn get(&self, name: FeatureName) -> f64 {
        self.values[name.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, f64)> + '_ {
        FeatureName::ALL.iter().map(move |f| (*f, self.values[f.index()]))
    }

    /// Values keyed by model column name, for the prediction consumer
    pub fn to_model_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter().map(|(f, v)| (f.model_name(), v)).collect()
    }

    pub(crate) fn with(mut self, name: FeatureName, value: f64) -> Self {
        self.values[name.index()] = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_order_matches_index() {
        for (i, f) in FeatureName::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn test_parse_either_casing() {
        assert_eq!("soil_tn".parse::<FeatureName>().unwrap(), FeatureName::SoilTn);
        assert_eq!("Soil_TN".parse::<FeatureName>().unwrap(), FeatureName::SoilTn);
        assert_eq!(
            "Fire_Risk_Index".parse::<FeatureName>().unwrap(),
            FeatureName::FireRiskIndex
        );
        assert!(matches!(
            "canopy_height".parse::<FeatureName>(),
            Err(Error::UnknownFeature(_))
        ));
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = FeatureName::ALL.iter().map(|f| f.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_model_map() {
        let v = FeatureVector::from_values([0.0; FEATURE_COUNT]).with(FeatureName::Humidity, 42.0);
        let map = v.to_model_map();
        assert_eq!(map.len(), FEATURE_COUNT);
        assert_eq!(map["Humidity"], 42.0);
    }
}
