//! Defaults table
//!
//! Statistically representative fallback value per feature. The built-in
//! table holds the medians of the forest-health training dataset; operators
//! can override individual entries from a JSON file at startup.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::feature::{FeatureName, FEATURE_COUNT};

const TRAINING_MEDIANS: [(FeatureName, f64); FEATURE_COUNT] = [
    (FeatureName::Slope, 21.808936091032585),
    (FeatureName::Elevation, 1503.5730226128198),
    (FeatureName::Temperature, 21.754533316862897),
    (FeatureName::Humidity, 59.614943703539744),
    (FeatureName::SoilTn, 0.5113024573782637),
    (FeatureName::SoilTp, 0.24975360936595653),
    (FeatureName::SoilAp, 0.24747083523271096),
    (FeatureName::SoilAn, 0.24380308068303527),
    (FeatureName::MenhinickIndex, 1.7524116930921474),
    (FeatureName::GleasonIndex, 2.9693736440949037),
    (FeatureName::DisturbanceLevel, 0.5230227736391104),
    (FeatureName::FireRiskIndex, 0.5164885287315552),
];

/// Read-only after construction; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultsTable {
    values: [Option<f64>; FEATURE_COUNT],
}

impl DefaultsTable {
    /// Training-set medians for every feature
    pub fn builtin() -> Self {
        let mut values = [None; FEATURE_COUNT];
        for (name, value) in TRAINING_MEDIANS {
            values[name.index()] = Some(value);
        }
        Self { values }
    }

    /// Table holding exactly the given entries. Features not listed have no
    /// default; [`DefaultsTable::validate`] reports the first gap.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (FeatureName, f64)>,
    {
        let mut values = [None; FEATURE_COUNT];
        for (name, value) in entries {
            if !value.is_finite() {
                return Err(Error::InvalidDefault { feature: name, value });
            }
            values[name.index()] = Some(value);
        }
        Ok(Self { values })
    }

    /// Built-in medians overridden by a JSON object of `feature -> value`.
    /// Keys may use either the bundle key or the model column name.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let overrides: HashMap<String, f64> = serde_json::from_str(json)?;
        let mut table = Self::builtin();
        for (key, value) in overrides {
            let name: FeatureName = key.parse()?;
            if !value.is_finite() {
                return Err(Error::InvalidDefault { feature: name, value });
            }
            table.values[name.index()] = Some(value);
        }
        Ok(table)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    #[inline]
    pub fn get(&self, name: FeatureName) -> Option<f64> {
        self.values[name.index()]
    }

    /// Default for `name`, or a schema inconsistency if the table has a gap
    pub fn require(&self, name: FeatureName) -> Result<f64> {
        self.get(name).ok_or(Error::SchemaInconsistency(name))
    }

    /// Every feature must have a default
    pub fn validate(&self) -> Result<()> {
        match FeatureName::ALL.iter().find(|f| self.get(**f).is_none()) {
            Some(missing) => Err(Error::SchemaInconsistency(*missing)),
            None => Ok(()),
        }
    }
}

impl Default for DefaultsTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_is_complete() {
        let table = DefaultsTable::builtin();
        assert!(table.validate().is_ok());
        assert_eq!(table.get(FeatureName::Humidity), Some(59.614943703539744));
    }

    #[test]
    fn test_medians_follow_schema_order() {
        for (i, (name, _)) in TRAINING_MEDIANS.iter().enumerate() {
            assert_eq!(name.index(), i);
        }
    }

    #[test]
    fn test_partial_entries_fail_validation() {
        let table = DefaultsTable::from_entries([(FeatureName::Slope, 10.0)]).unwrap();
        assert!(matches!(
            table.validate(),
            Err(Error::SchemaInconsistency(FeatureName::Elevation))
        ));
    }

    #[test]
    fn test_non_finite_entry_rejected() {
        let result = DefaultsTable::from_entries([(FeatureName::Slope, f64::NAN)]);
        assert!(matches!(result, Err(Error::InvalidDefault { .. })));
    }

    #[test]
    fn test_json_overrides_accept_both_casings() {
        let table =
            DefaultsTable::from_json_str(r#"{"Slope": 5.0, "fire_risk_index": 0.3}"#).unwrap();
        assert_eq!(table.get(FeatureName::Slope), Some(5.0));
        assert_eq!(table.get(FeatureName::FireRiskIndex), Some(0.3));
        assert_eq!(table.get(FeatureName::Elevation), Some(1503.5730226128198));
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_json_unknown_key_rejected() {
        let result = DefaultsTable::from_json_str(r#"{"canopy": 1.0}"#);
        assert!(matches!(result, Err(Error::UnknownFeature(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Gleason_Index": 3.5}}"#).unwrap();
        let table = DefaultsTable::from_json_file(file.path()).unwrap();
        assert_eq!(table.get(FeatureName::GleasonIndex), Some(3.5));
    }
}
