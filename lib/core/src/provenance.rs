use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::feature::{FeatureName, FEATURE_COUNT};

/// How a feature value was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Came directly from a live provider
    Api,
    /// Derived by a heuristic formula from other values
    Proxy,
    /// Static fallback constant
    Default,
}

/// Provenance tag for every feature, parallel to [`crate::FeatureVector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvenanceMap {
    sources: [Source; FEATURE_COUNT],
}

impl ProvenanceMap {
    pub(crate) fn from_sources(sources: [Source; FEATURE_COUNT]) -> Self {
        Self { sources }
    }

    #[inline]
    pub fn get(&self, name: FeatureName) -> Source {
        self.sources[name.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, Source)> + '_ {
        FeatureName::ALL.iter().map(move |f| (*f, self.sources[f.index()]))
    }

    /// Number of features carrying the given tag
    pub fn count(&self, source: Source) -> usize {
        self.sources.iter().filter(|s| **s == source).count()
    }

    pub fn to_map(&self) -> BTreeMap<FeatureName, Source> {
        self.iter().collect()
    }
}
