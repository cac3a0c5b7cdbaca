//! File-backed provider gateway.
//!
//! Each provider's view of a zone lives in `{root}/{provider}/{zone}.json` as a
//! JSON object of provider key -> record. A missing file is an empty zone.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use zone_manager_core::diff::{apply_diff, ZoneDiff};
use zone_manager_core::error::{CoreError, CoreResult};
use zone_manager_core::traits::ProviderGateway;
use zone_manager_core::types::{ObservedRecords, ProviderType};

/// `ProviderGateway` over JSON snapshot files on disk.
pub struct JsonSnapshotGateway {
    root: PathBuf,
}

impl JsonSnapshotGateway {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Snapshot file for one provider and zone.
    pub fn snapshot_path(&self, zone_name: &str, provider: ProviderType) -> PathBuf {
        self.root
            .join(provider.as_str())
            .join(format!("{zone_name}.json"))
    }
}

fn provider_error(provider: ProviderType, message: String) -> CoreError {
    CoreError::ProviderError {
        provider: provider.to_string(),
        message,
    }
}

#[async_trait]
impl ProviderGateway for JsonSnapshotGateway {
    async fn fetch_records(
        &self,
        zone_name: &str,
        provider: ProviderType,
    ) -> CoreResult<ObservedRecords> {
        let path = self.snapshot_path(zone_name, provider);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No snapshot at {}, treating as empty", path.display());
                return Ok(ObservedRecords::new());
            }
            Err(e) => {
                return Err(provider_error(
                    provider,
                    format!("Failed to read {}: {e}", path.display()),
                ))
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            CoreError::SerializationError(format!("Invalid snapshot {}: {e}", path.display()))
        })
    }

    async fn apply(
        &self,
        zone_name: &str,
        provider: ProviderType,
        diff: &ZoneDiff,
    ) -> CoreResult<()> {
        let current = self.fetch_records(zone_name, provider).await?;
        let next = apply_diff(&current, diff);

        let path = self.snapshot_path(zone_name, provider);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                provider_error(provider, format!("Failed to create directory: {e}"))
            })?;
        }
        let json = serde_json::to_string_pretty(&next)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        tokio::fs::write(&path, json).await.map_err(|e| {
            provider_error(provider, format!("Failed to write {}: {e}", path.display()))
        })?;

        log::info!(
            "Applied {} change(s) to {provider} snapshot of {zone_name}",
            diff.total_changes()
        );
        Ok(())
    }
}
