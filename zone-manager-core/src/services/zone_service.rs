//! Zone 管理服务

use std::sync::Arc;

use crate::bind::{export_zone, parse_zone_with};
use crate::checksum::zone_checksum;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::services::{log_failure, ServiceContext};
use crate::types::{DnsRecord, NewRecord, RecordId, RecordType, Zone, ZoneSummary};
use crate::utils::names::normalize_zone_name;
use crate::utils::serial::{next_serial, today};
use crate::validation::{is_valid_zone_name, validate_record, validate_zone_with};

/// Zone 管理服务
///
/// Every mutation goes through validation first; a rejected change leaves the
/// stored zone untouched.
pub struct ZoneService {
    ctx: Arc<ServiceContext>,
}

impl ZoneService {
    /// 创建 Zone 服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Create an empty zone with the configured nameservers and today's serial.
    ///
    /// # Arguments
    /// * `name` - Zone name, normalized before use
    /// * `ttl` - Default TTL, the configured default when `None`
    pub async fn create_zone(&self, name: &str, ttl: Option<u32>) -> CoreResult<Zone> {
        let result = self.create_zone_inner(name, ttl).await;
        match &result {
            Ok(zone) => log::info!("Created zone {} (serial {})", zone.name, zone.serial),
            Err(e) => log_failure("create_zone", e),
        }
        result
    }

    async fn create_zone_inner(&self, name: &str, ttl: Option<u32>) -> CoreResult<Zone> {
        let name = normalize_zone_name(name);
        let mut problems = Vec::new();
        if !is_valid_zone_name(&name) {
            problems.push(ValidationError::InvalidZoneName { name: name.clone() });
        }
        if ttl == Some(0) {
            problems.push(ValidationError::InvalidTtl { ttl: 0 });
        }
        if !problems.is_empty() {
            return Err(CoreError::ValidationFailed(problems));
        }

        if self.ctx.zone_repository.find_by_name(&name).await?.is_some() {
            return Err(CoreError::ZoneExists(name));
        }

        let mut zone = Zone::with_defaults(&name, &self.ctx.config.zone_defaults, today());
        if let Some(ttl) = ttl {
            zone.ttl = ttl;
        }
        self.ctx.zone_repository.save(&mut zone).await?;
        Ok(zone)
    }

    /// 获取 Zone 详情
    pub async fn get_zone(&self, name: &str) -> CoreResult<Zone> {
        self.ctx.load_zone(name).await
    }

    /// 列出所有 Zone（按名称排序）
    pub async fn list_zones(&self) -> CoreResult<Vec<ZoneSummary>> {
        self.ctx.zone_repository.list().await
    }

    /// 删除 Zone 及其全部记录
    pub async fn delete_zone(&self, name: &str) -> CoreResult<bool> {
        let deleted = self.ctx.zone_repository.delete(name).await?;
        if deleted {
            log::info!("Deleted zone {}", normalize_zone_name(name));
        }
        Ok(deleted)
    }

    /// Validate and append a record, bumping the zone serial.
    ///
    /// Returns the stored record with its assigned id.
    pub async fn add_record(&self, zone_name: &str, request: NewRecord) -> CoreResult<DnsRecord> {
        let result = self.add_record_inner(zone_name, request).await;
        match &result {
            Ok(record) => log::info!(
                "Added {} record '{}' to zone {}",
                record.record_type,
                record.name,
                normalize_zone_name(zone_name)
            ),
            Err(e) => log_failure("add_record", e),
        }
        result
    }

    async fn add_record_inner(&self, zone_name: &str, request: NewRecord) -> CoreResult<DnsRecord> {
        let record = request.into_record()?;
        let problems = validate_record(&record);
        if !problems.is_empty() {
            return Err(CoreError::ValidationFailed(
                problems
                    .into_iter()
                    .map(|e| ValidationError::in_record(record.record_type, &record.name, e))
                    .collect(),
            ));
        }

        let mut zone = self.ctx.load_zone(zone_name).await?;
        zone.add_record(record);
        zone.bump_serial(today());
        self.ctx.zone_repository.save(&mut zone).await?;

        zone.records
            .pop()
            .ok_or_else(|| CoreError::StorageError("record vanished after save".to_string()))
    }

    /// Remove a record by id; `false` when the zone has no such record.
    ///
    /// Removing the last apex NS record puts the configured default
    /// nameservers back on the zone.
    pub async fn remove_record(&self, zone_name: &str, record_id: RecordId) -> CoreResult<bool> {
        let mut zone = self.ctx.load_zone(zone_name).await?;
        let apex_ns = zone.records.iter().any(|r| {
            r.id == Some(record_id) && r.record_type == RecordType::Ns && r.is_apex()
        });
        if !zone.remove_record(record_id) {
            log::warn!("Record {record_id} not found in zone {}", zone.name);
            return Ok(false);
        }
        if apex_ns {
            zone.reset_nameservers(&self.ctx.config.zone_defaults.nameservers);
        }
        zone.bump_serial(today());
        self.ctx.zone_repository.save(&mut zone).await?;
        log::info!("Removed record {record_id} from zone {}", zone.name);
        Ok(true)
    }

    /// All validation problems of a stored zone; empty when it is valid.
    pub async fn validate_zone(&self, name: &str) -> CoreResult<Vec<ValidationError>> {
        let zone = self.ctx.load_zone(name).await?;
        Ok(validate_zone_with(&zone, &self.ctx.config.validation))
    }

    /// 导出 BIND 格式
    pub async fn export_zone(&self, name: &str) -> CoreResult<String> {
        let zone = self.ctx.load_zone(name).await?;
        Ok(export_zone(&zone))
    }

    /// Parse, validate and persist a zone file.
    ///
    /// # Arguments
    /// * `text` - Zone file content
    /// * `fallback_origin` - Zone name when the file has no `$ORIGIN`
    /// * `replace` - Overwrite an existing zone of the same name
    pub async fn import_zone(
        &self,
        text: &str,
        fallback_origin: Option<&str>,
        replace: bool,
    ) -> CoreResult<Zone> {
        let result = self.import_zone_inner(text, fallback_origin, replace).await;
        match &result {
            Ok(zone) => log::info!(
                "Imported zone {} with {} record(s)",
                zone.name,
                zone.records.len()
            ),
            Err(e) => log_failure("import_zone", e),
        }
        result
    }

    async fn import_zone_inner(
        &self,
        text: &str,
        fallback_origin: Option<&str>,
        replace: bool,
    ) -> CoreResult<Zone> {
        let mut zone = parse_zone_with(text, fallback_origin, &self.ctx.config)?;

        if let Some(existing) = self.ctx.zone_repository.find_by_name(&zone.name).await? {
            if !replace {
                return Err(CoreError::ZoneExists(zone.name));
            }
            zone.id = existing.id;
            if zone.serial <= existing.serial {
                zone.serial = next_serial(existing.serial, today());
            }
        }

        self.ctx.zone_repository.save(&mut zone).await?;
        Ok(zone)
    }

    /// SHA-256 content fingerprint of a stored zone.
    pub async fn checksum(&self, name: &str) -> CoreResult<String> {
        let zone = self.ctx.load_zone(name).await?;
        Ok(zone_checksum(&zone))
    }
}
