//! Provider 同步服务

use std::sync::Arc;

use crate::diff::diff_zone;
use crate::error::CoreResult;
use crate::services::{log_failure, ServiceContext};
use crate::types::{ProviderType, SyncSummary};
use crate::utils::names::normalize_zone_name;

/// Provider 同步服务
///
/// Compares a stored zone with what a provider currently serves and, unless
/// running dry, pushes the difference through the [`ProviderGateway`](crate::ProviderGateway).
pub struct SyncService {
    ctx: Arc<ServiceContext>,
}

impl SyncService {
    /// 创建同步服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Plan (and optionally apply) a sync of `zone_name` to `provider`.
    ///
    /// Only a missing zone or a storage failure is an `Err`. Provider problems
    /// (unsupported provider, fetch or apply failures) and unclassifiable
    /// observed records end up in [`SyncSummary::errors`].
    pub async fn sync(
        &self,
        zone_name: &str,
        provider: &str,
        dry_run: bool,
    ) -> CoreResult<SyncSummary> {
        let zone = self.ctx.load_zone(zone_name).await?;
        let mut summary = SyncSummary::empty(provider, &zone.name, dry_run);

        let provider_type = match provider.parse::<ProviderType>() {
            Ok(p) => p,
            Err(e) => {
                log_failure("sync", &e);
                summary.errors.push(e.to_string());
                return Ok(summary);
            }
        };
        summary.provider = provider_type.to_string();

        let observed = match self
            .ctx
            .provider_gateway
            .fetch_records(&zone.name, provider_type)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                log_failure("fetch_records", &e);
                summary.errors.push(e.to_string());
                return Ok(summary);
            }
        };

        let diff = diff_zone(&zone, &observed);
        summary.errors.extend(diff.errors.iter().map(ToString::to_string));
        summary.total_changes = diff.total_changes();

        if !dry_run && !diff.is_empty() {
            match self
                .ctx
                .provider_gateway
                .apply(&zone.name, provider_type, &diff)
                .await
            {
                Ok(()) => {
                    summary.applied = true;
                    log::info!(
                        "Applied {} change(s) to {} for zone {}",
                        summary.total_changes,
                        provider_type,
                        zone.name
                    );
                }
                Err(e) => {
                    log_failure("apply", &e);
                    summary.errors.push(e.to_string());
                }
            }
        } else {
            log::info!(
                "Planned {} change(s) to {} for zone {} (dry_run={dry_run})",
                summary.total_changes,
                provider_type,
                normalize_zone_name(zone_name)
            );
        }

        summary.records_to_create = diff.to_create;
        summary.records_to_update = diff.to_update;
        summary.records_to_delete = diff.to_delete;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::test_utils::{create_test_context_with_gateway, MockProviderGateway, SAMPLE_ZONE_FILE};
    use crate::types::{ObservedRecord, ObservedRecords};
    use crate::ZoneService;

    async fn setup(gateway: Arc<MockProviderGateway>) -> SyncService {
        let ctx = create_test_context_with_gateway(gateway);
        let zones = ZoneService::new(Arc::clone(&ctx));
        let imported = zones.import_zone(SAMPLE_ZONE_FILE, None, false).await;
        assert!(imported.is_ok(), "unexpected result: {imported:?}");
        SyncService::new(ctx)
    }

    #[tokio::test]
    async fn dry_run_plans_without_applying() {
        let gateway = Arc::new(MockProviderGateway::new());
        let svc = setup(Arc::clone(&gateway)).await;

        let res = svc.sync("example.com", "cloudflare", true).await;
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(summary) = res else {
            return;
        };
        assert!(summary.dry_run);
        assert!(!summary.applied);
        assert_eq!(summary.total_changes, summary.records_to_create.len());
        assert!(summary.total_changes > 0);
        assert_eq!(gateway.applied_count().await, 0);
    }

    #[tokio::test]
    async fn apply_pushes_the_diff_once() {
        let gateway = Arc::new(MockProviderGateway::new());
        let svc = setup(Arc::clone(&gateway)).await;

        let first = svc.sync("example.com", "route53", false).await;
        assert!(matches!(&first, Ok(s) if s.applied && s.total_changes > 0));
        assert_eq!(gateway.applied_count().await, 1);

        // The mock now serves the applied records, so a second run is a no-op.
        let second = svc.sync("example.com", "route53", false).await;
        assert!(matches!(&second, Ok(s) if !s.applied && s.total_changes == 0));
        assert_eq!(gateway.applied_count().await, 1);
    }

    #[tokio::test]
    async fn unsupported_provider_is_reported_in_summary() {
        let gateway = Arc::new(MockProviderGateway::new());
        let svc = setup(gateway).await;

        let res = svc.sync("example.com", "godaddy", false).await;
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(summary) = res else {
            return;
        };
        assert_eq!(summary.total_changes, 0);
        assert_eq!(summary.errors, vec!["Unsupported provider: godaddy".to_string()]);
    }

    #[tokio::test]
    async fn gateway_failures_are_collected() {
        let gateway = Arc::new(MockProviderGateway::new());
        gateway.set_fetch_error(Some("timeout".to_string())).await;
        let svc = setup(Arc::clone(&gateway)).await;

        let res = svc.sync("example.com", "digitalocean", false).await;
        assert!(matches!(&res, Ok(s) if s.errors.len() == 1 && !s.applied));
    }

    #[tokio::test]
    async fn malformed_observed_records_do_not_block_sync() {
        let gateway = Arc::new(MockProviderGateway::new());
        let mut bogus = ObservedRecords::new();
        bogus.insert(
            "rec-1".to_string(),
            ObservedRecord {
                id: Some("rec-1".to_string()),
                record_type: "LOC".to_string(),
                name: "www".to_string(),
                value: "x".to_string(),
                ttl: 300,
                priority: None,
            },
        );
        gateway.seed("example.com", bogus).await;
        let svc = setup(Arc::clone(&gateway)).await;

        let res = svc.sync("example.com", "cloudflare", true).await;
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(summary) = res else {
            return;
        };
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.errors[0].starts_with("rec-1:"));
        assert!(summary.records_to_delete.is_empty());
        assert!(summary.total_changes > 0);
    }

    #[tokio::test]
    async fn missing_zone_is_an_error() {
        let gateway = Arc::new(MockProviderGateway::new());
        let svc = SyncService::new(create_test_context_with_gateway(gateway));
        let res = svc.sync("nope.com", "cloudflare", true).await;
        assert!(matches!(res, Err(CoreError::ZoneNotFound(_))));
    }
}
