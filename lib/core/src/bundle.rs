//! Aggregation output contract
//!
//! A [`FeatureBundle`] serializes as a flat JSON object mapping each feature
//! key to its value, plus a `source` object with the provenance tags:
//!
//! ```json
//! { "elevation": 52.0, "temperature": 22.0, ..., "source": { "elevation": "api", ... } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Error;
use crate::feature::{FeatureName, FeatureVector, FEATURE_COUNT};
use crate::provenance::{ProvenanceMap, Source};
use crate::proxy::amplify_nitrogen;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBundle", into = "RawBundle")]
pub struct FeatureBundle {
    pub features: FeatureVector,
    pub source: ProvenanceMap,
}

impl FeatureBundle {
    pub fn new(features: FeatureVector, source: ProvenanceMap) -> Self {
        Self { features, source }
    }

    #[inline]
    pub fn value(&self, name: FeatureName) -> f64 {
        self.features.get(name)
    }

    #[inline]
    pub fn source_of(&self, name: FeatureName) -> Source {
        self.source.get(name)
    }

    /// Copy with soil nitrogen passed through the visibility amplification.
    /// For display only; the result no longer satisfies the nitrogen ratio.
    pub fn with_amplified_nitrogen(&self) -> Self {
        let tn = self.features.get(FeatureName::SoilTn);
        Self {
            features: self.features.with(FeatureName::SoilTn, amplify_nitrogen(tn)),
            source: self.source,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawBundle {
    #[serde(flatten)]
    values: BTreeMap<FeatureName, f64>,
    source: BTreeMap<FeatureName, Source>,
}

impl From<FeatureBundle> for RawBundle {
    fn from(bundle: FeatureBundle) -> Self {
        Self {
            values: bundle.features.iter().collect(),
            source: bundle.source.to_map(),
        }
    }
}

impl TryFrom<RawBundle> for FeatureBundle {
    type Error = Error;

    fn try_from(raw: RawBundle) -> Result<Self, Self::Error> {
        let mut values = [0.0; FEATURE_COUNT];
        let mut sources = [Source::Default; FEATURE_COUNT];
        for name in FeatureName::ALL {
            values[name.index()] = *raw
                .values
                .get(&name)
                .ok_or(Error::SchemaInconsistency(name))?;
            sources[name.index()] = *raw
                .source
                .get(&name)
                .ok_or(Error::SchemaInconsistency(name))?;
        }
        Ok(Self {
            features: FeatureVector::from_values(values),
            source: ProvenanceMap::from_sources(sources),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::readings::Readings;
    use crate::defaults::DefaultsTable;

    fn defaulted_bundle() -> FeatureBundle {
        assemble(&Readings::default(), &DefaultsTable::builtin()).unwrap()
    }

    #[test]
    fn test_json_shape_is_flat_with_source() {
        let json = serde_json::to_value(defaulted_bundle()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), FEATURE_COUNT + 1);
        for name in FeatureName::ALL {
            assert!(obj[name.key()].is_f64());
            let tag = obj["source"][name.key()].as_str().unwrap();
            assert!(["api", "proxy", "default"].contains(&tag));
        }
    }

    #[test]
    fn test_missing_feature_is_rejected() {
        let mut json = serde_json::to_value(defaulted_bundle()).unwrap();
        json.as_object_mut().unwrap().remove("slope");
        let err = serde_json::from_value::<FeatureBundle>(json).unwrap_err();
        assert!(err.to_string().contains("slope"));
    }

    #[test]
    fn test_amplified_nitrogen_keeps_provenance() {
        let bundle = defaulted_bundle();
        let shown = bundle.with_amplified_nitrogen();
        assert_eq!(shown.source, bundle.source);
        assert_eq!(
            shown.value(FeatureName::SoilTn),
            amplify_nitrogen(bundle.value(FeatureName::SoilTn))
        );
        assert_eq!(shown.value(FeatureName::SoilAn), bundle.value(FeatureName::SoilAn));
    }
}
