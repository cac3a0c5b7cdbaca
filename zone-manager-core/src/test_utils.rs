//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::config::{ZoneDefaults, ZoneManagerConfig};
use crate::diff::{apply_diff, ZoneDiff};
use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{InMemoryZoneRepository, ProviderGateway};
use crate::types::{DnsRecord, NewRecord, ObservedRecords, ProviderType, RecordType, Zone};

/// A small zone that passes validation.
pub const SAMPLE_ZONE_FILE: &str = "\
$ORIGIN example.com.
$TTL 3600
@ 300 IN SOA ns1.example.com. hostmaster.example.com. 2024050101 7200 3600 1209600 3600
@ 300 IN NS ns1.example.com.
@ 300 IN NS ns2.example.com.
@ 300 IN MX 10 mail.example.com
www 300 IN A 93.184.216.34
mail 300 IN A 93.184.216.40
";

// ===== MockProviderGateway =====

pub struct MockProviderGateway {
    zones: RwLock<HashMap<String, ObservedRecords>>,
    applied: RwLock<usize>,
    /// 如果 Some，fetch_records 时返回此错误
    fetch_error: RwLock<Option<String>>,
}

impl MockProviderGateway {
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(HashMap::new()),
            applied: RwLock::new(0),
            fetch_error: RwLock::new(None),
        }
    }

    pub async fn seed(&self, zone_name: &str, records: ObservedRecords) {
        self.zones
            .write()
            .await
            .insert(zone_name.to_string(), records);
    }

    pub async fn set_fetch_error(&self, err: Option<String>) {
        *self.fetch_error.write().await = err;
    }

    pub async fn applied_count(&self) -> usize {
        *self.applied.read().await
    }
}

#[async_trait]
impl ProviderGateway for MockProviderGateway {
    async fn fetch_records(
        &self,
        zone_name: &str,
        provider: ProviderType,
    ) -> CoreResult<ObservedRecords> {
        if let Some(ref msg) = *self.fetch_error.read().await {
            return Err(CoreError::ProviderError {
                provider: provider.to_string(),
                message: msg.clone(),
            });
        }
        Ok(self
            .zones
            .read()
            .await
            .get(zone_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn apply(
        &self,
        zone_name: &str,
        _provider: ProviderType,
        diff: &ZoneDiff,
    ) -> CoreResult<()> {
        let mut zones = self.zones.write().await;
        let current = zones.get(zone_name).cloned().unwrap_or_default();
        zones.insert(zone_name.to_string(), apply_diff(&current, diff));
        *self.applied.write().await += 1;
        Ok(())
    }
}

// ===== Factories =====

pub fn sample_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default()
}

/// `example.com` with one SOA and one apex NS record, serial `2024050101`.
pub fn minimal_valid_zone() -> Zone {
    let mut zone = Zone::with_defaults("example.com", &ZoneDefaults::default(), sample_day());
    zone.add_record(DnsRecord::of(
        RecordType::Soa,
        "@",
        "ns1.example.com. hostmaster.example.com.",
    ));
    zone.add_record(DnsRecord::of(RecordType::Ns, "@", "ns1.example.com."));
    zone
}

pub fn new_record(record_type: &str, name: &str, value: &str, priority: Option<u32>) -> NewRecord {
    NewRecord {
        record_type: record_type.to_string(),
        name: name.to_string(),
        value: value.to_string(),
        ttl: None,
        priority,
    }
}

pub fn create_test_context() -> Arc<ServiceContext> {
    create_test_context_with(ZoneManagerConfig::default())
}

pub fn create_test_context_with(config: ZoneManagerConfig) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(
        Arc::new(InMemoryZoneRepository::new()),
        Arc::new(MockProviderGateway::new()),
        config,
    ))
}

pub fn create_test_context_with_gateway(gateway: Arc<MockProviderGateway>) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(
        Arc::new(InMemoryZoneRepository::new()),
        gateway,
        ZoneManagerConfig::default(),
    ))
}
