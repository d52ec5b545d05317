use async_trait::async_trait;
use sylvan_core::Coordinate;
use tracing::warn;

use crate::error::ProviderError;

/// One external data source.
///
/// Implementors only write [`Provider::try_fetch`]. Callers use
/// [`Provider::fetch`], which never fails: any error is logged and turned
/// into the all-absent reading.
#[async_trait]
pub trait Provider: Send + Sync {
    type Reading: Default + Send;

    /// Short name for logs
    fn name(&self) -> &'static str;

    async fn try_fetch(&self, at: Coordinate) -> Result<Self::Reading, ProviderError>;

    async fn fetch(&self, at: Coordinate) -> Self::Reading {
        match self.try_fetch(at).await {
            Ok(reading) => reading,
            Err(e) => {
                warn!(
                    provider = self.name(),
                    lat = at.lat,
                    lon = at.lon,
                    timeout = e.is_timeout(),
                    error = %e,
                    "provider unavailable, treating as absent"
                );
                Self::Reading::default()
            }
        }
    }
}
