pub mod aggregator;
pub mod cache;

pub use aggregator::Aggregator;
pub use cache::{CacheConfig, CacheStats, CellKey, FeatureCache};
