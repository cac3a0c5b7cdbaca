//! `ZoneRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use zone_manager_core::error::{CoreError, CoreResult};
use zone_manager_core::traits::ZoneRepository;
use zone_manager_core::types::{DnsRecord, RecordType, Zone, ZoneId, ZoneSummary};
use zone_manager_core::utils::datetime::parse_rfc3339;
use zone_manager_core::utils::names::normalize_zone_name;

use super::entity::{record, zone};
use super::{db_error, SqliteStore};

fn to_u32(value: i64, field: &str) -> CoreResult<u32> {
    u32::try_from(value)
        .map_err(|_| CoreError::SerializationError(format!("Invalid {field}: {value}")))
}

impl record::Model {
    /// Convert a `SeaORM` row model into a domain `DnsRecord`.
    fn into_record(self) -> CoreResult<DnsRecord> {
        let record_type: RecordType = self.record_type.parse().map_err(|_| {
            CoreError::SerializationError(format!("Invalid record type: {}", self.record_type))
        })?;
        Ok(DnsRecord {
            id: Some(self.id),
            record_type,
            name: self.name,
            value: self.value,
            ttl: to_u32(self.ttl, "ttl")?,
            priority: self.priority.map(|p| to_u32(p, "priority")).transpose()?,
        })
    }
}

impl zone::Model {
    fn into_zone(self, records: Vec<record::Model>) -> CoreResult<Zone> {
        let nameservers: Vec<String> = serde_json::from_str(&self.nameservers)
            .map_err(|e| CoreError::SerializationError(format!("Invalid nameservers: {e}")))?;
        let records = records
            .into_iter()
            .map(record::Model::into_record)
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Zone {
            id: Some(self.id),
            name: self.name,
            ttl: to_u32(self.ttl, "ttl")?,
            serial: to_u32(self.serial, "serial")?,
            nameservers,
            records,
        })
    }

    fn into_summary(self) -> CoreResult<ZoneSummary> {
        let created_at = parse_rfc3339(&self.created_at).ok_or_else(|| {
            CoreError::SerializationError(format!("Invalid created_at: {}", self.created_at))
        })?;
        Ok(ZoneSummary {
            name: self.name,
            ttl: to_u32(self.ttl, "ttl")?,
            serial: to_u32(self.serial, "serial")?,
            created_at,
        })
    }
}

async fn find_zone_row<C: ConnectionTrait>(db: &C, name: &str) -> CoreResult<Option<zone::Model>> {
    zone::Entity::find()
        .filter(zone::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(|e| db_error("query zone", &e))
}

#[async_trait]
impl ZoneRepository for SqliteStore {
    async fn find_by_name(&self, name: &str) -> CoreResult<Option<Zone>> {
        let name = normalize_zone_name(name);
        let Some(row) = find_zone_row(&self.db, &name).await? else {
            return Ok(None);
        };

        let records = record::Entity::find()
            .filter(record::Column::ZoneId.eq(row.id))
            .order_by_asc(record::Column::Position)
            .all(&self.db)
            .await
            .map_err(|e| db_error("query records", &e))?;

        row.into_zone(records).map(Some)
    }

    async fn save(&self, zone: &mut Zone) -> CoreResult<ZoneId> {
        zone.name = normalize_zone_name(&zone.name);
        let nameservers = serde_json::to_string(&zone.nameservers)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", &e))?;

        let zone_id = match find_zone_row(&txn, &zone.name).await? {
            Some(existing) => {
                zone::ActiveModel {
                    id: Set(existing.id),
                    name: NotSet,
                    ttl: Set(i64::from(zone.ttl)),
                    serial: Set(i64::from(zone.serial)),
                    nameservers: Set(nameservers),
                    created_at: NotSet,
                    updated_at: Set(now),
                }
                .update(&txn)
                .await
                .map_err(|e| db_error("update zone", &e))?;
                existing.id
            }
            None => {
                let row = zone::ActiveModel {
                    id: NotSet,
                    name: Set(zone.name.clone()),
                    ttl: Set(i64::from(zone.ttl)),
                    serial: Set(i64::from(zone.serial)),
                    nameservers: Set(nameservers),
                    created_at: Set(now.clone()),
                    updated_at: Set(now),
                };
                zone::Entity::insert(row)
                    .exec(&txn)
                    .await
                    .map_err(|e| db_error("insert zone", &e))?
                    .last_insert_id
            }
        };

        // The record set is replaced wholesale; surviving records keep their ids.
        record::Entity::delete_many()
            .filter(record::Column::ZoneId.eq(zone_id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("clear records", &e))?;

        let mut assigned = Vec::with_capacity(zone.records.len());
        for (position, rec) in (0_i64..).zip(zone.records.iter()) {
            let row = record::ActiveModel {
                id: rec.id.map_or(NotSet, Set),
                zone_id: Set(zone_id),
                position: Set(position),
                record_type: Set(rec.record_type.to_string()),
                name: Set(rec.name.clone()),
                value: Set(rec.value.clone()),
                ttl: Set(i64::from(rec.ttl)),
                priority: Set(rec.priority.map(i64::from)),
            };
            let id = record::Entity::insert(row)
                .exec(&txn)
                .await
                .map_err(|e| db_error("insert record", &e))?
                .last_insert_id;
            assigned.push(id);
        }

        txn.commit()
            .await
            .map_err(|e| db_error("commit zone", &e))?;

        zone.id = Some(zone_id);
        for (rec, id) in zone.records.iter_mut().zip(assigned) {
            rec.id = Some(id);
        }
        log::debug!(
            "Saved zone {} (id {zone_id}, {} record(s))",
            zone.name,
            zone.records.len()
        );
        Ok(zone_id)
    }

    async fn delete(&self, name: &str) -> CoreResult<bool> {
        let name = normalize_zone_name(name);
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", &e))?;

        let Some(row) = find_zone_row(&txn, &name).await? else {
            return Ok(false);
        };

        record::Entity::delete_many()
            .filter(record::Column::ZoneId.eq(row.id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("delete records", &e))?;
        zone::Entity::delete_by_id(row.id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("delete zone", &e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("commit delete", &e))?;
        Ok(true)
    }

    async fn list(&self) -> CoreResult<Vec<ZoneSummary>> {
        let rows = zone::Entity::find()
            .order_by_asc(zone::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("query zones", &e))?;

        rows.into_iter().map(zone::Model::into_summary).collect()
    }
}
