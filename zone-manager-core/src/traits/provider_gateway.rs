//! DNS provider access abstract Trait

use async_trait::async_trait;

use crate::diff::ZoneDiff;
use crate::error::CoreResult;
use crate::types::{ObservedRecords, ProviderType};

/// Reads and writes a provider's live record set.
///
/// Platform implementation:
/// - CLI: `JsonSnapshotGateway` (JSON files per provider and zone)
/// - Tests: `MockProviderGateway`
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Current records the provider holds for a zone
    ///
    /// # Arguments
    /// * `zone_name` - Normalized zone name
    /// * `provider` - Target provider
    async fn fetch_records(
        &self,
        zone_name: &str,
        provider: ProviderType,
    ) -> CoreResult<ObservedRecords>;

    /// Push a computed diff to the provider
    ///
    /// # Arguments
    /// * `zone_name` - Normalized zone name
    /// * `provider` - Target provider
    /// * `diff` - Changes to apply
    async fn apply(&self, zone_name: &str, provider: ProviderType, diff: &ZoneDiff)
        -> CoreResult<()>;
}
