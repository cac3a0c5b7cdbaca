//! Zone persistence abstract Trait

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::types::{Zone, ZoneId, ZoneSummary};
use crate::utils::names::normalize_zone_name;

/// Zone storage Trait
///
/// Zones are looked up by normalized name. Deleting a zone deletes its records.
///
/// Platform implementation:
/// - CLI: `SqliteStore` (`SeaORM`)
/// - Tests / ephemeral use: [`InMemoryZoneRepository`]
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    /// Load a zone with all of its records
    ///
    /// # Arguments
    /// * `name` - Zone name, any case, with or without trailing dot
    async fn find_by_name(&self, name: &str) -> CoreResult<Option<Zone>>;

    /// Insert or replace a zone and its record set
    ///
    /// Assigns `zone.id` and the ids of new records in place.
    ///
    /// # Arguments
    /// * `zone` - Zone to persist
    async fn save(&self, zone: &mut Zone) -> CoreResult<ZoneId>;

    /// Delete a zone and its records; `false` when it did not exist
    ///
    /// # Arguments
    /// * `name` - Zone name
    async fn delete(&self, name: &str) -> CoreResult<bool>;

    /// All zones, ordered by name
    async fn list(&self) -> CoreResult<Vec<ZoneSummary>>;
}

struct StoredZone {
    zone: Zone,
    created_at: DateTime<Utc>,
}

/// In-memory zone repository
///
/// Default implementation, available on all platforms.
#[derive(Clone)]
pub struct InMemoryZoneRepository {
    zones: Arc<RwLock<HashMap<String, StoredZone>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryZoneRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self {
            zones: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for InMemoryZoneRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ZoneRepository for InMemoryZoneRepository {
    async fn find_by_name(&self, name: &str) -> CoreResult<Option<Zone>> {
        let key = normalize_zone_name(name);
        Ok(self.zones.read().await.get(&key).map(|s| s.zone.clone()))
    }

    async fn save(&self, zone: &mut Zone) -> CoreResult<ZoneId> {
        zone.name = normalize_zone_name(&zone.name);
        let mut zones = self.zones.write().await;

        let existing = zones.get(&zone.name);
        let zone_id = match (zone.id, existing.and_then(|s| s.zone.id)) {
            (_, Some(id)) | (Some(id), None) => id,
            (None, None) => self.allocate_id(),
        };
        let created_at = existing.map_or_else(Utc::now, |s| s.created_at);

        zone.id = Some(zone_id);
        for record in &mut zone.records {
            if record.id.is_none() {
                record.id = Some(self.allocate_id());
            }
        }

        zones.insert(
            zone.name.clone(),
            StoredZone {
                zone: zone.clone(),
                created_at,
            },
        );
        Ok(zone_id)
    }

    async fn delete(&self, name: &str) -> CoreResult<bool> {
        let key = normalize_zone_name(name);
        Ok(self.zones.write().await.remove(&key).is_some())
    }

    async fn list(&self) -> CoreResult<Vec<ZoneSummary>> {
        let zones = self.zones.read().await;
        let mut summaries: Vec<ZoneSummary> = zones
            .values()
            .map(|s| ZoneSummary {
                name: s.zone.name.clone(),
                ttl: s.zone.ttl,
                serial: s.zone.serial,
                created_at: s.created_at,
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::minimal_valid_zone;

    #[tokio::test]
    async fn save_assigns_ids_and_round_trips() {
        let repo = InMemoryZoneRepository::new();
        let mut zone = minimal_valid_zone();
        let res = repo.save(&mut zone).await;
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(id) = res else {
            return;
        };
        assert_eq!(zone.id, Some(id));
        assert!(zone.records.iter().all(|r| r.id.is_some()));

        let loaded = repo.find_by_name("EXAMPLE.com.").await.ok().flatten();
        assert!(loaded.is_some_and(|z| z.content_eq(&zone)));
    }

    #[tokio::test]
    async fn resave_keeps_zone_id() {
        let repo = InMemoryZoneRepository::new();
        let mut zone = minimal_valid_zone();
        let first = repo.save(&mut zone).await.ok();

        let mut fresh = minimal_valid_zone();
        let second = repo.save(&mut fresh).await.ok();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn list_is_sorted_and_delete_reports_presence() {
        let repo = InMemoryZoneRepository::new();
        for name in ["zeta.org", "alpha.net", "example.com"] {
            let mut zone = minimal_valid_zone();
            zone.name = name.to_string();
            let _ = repo.save(&mut zone).await;
        }

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["alpha.net", "example.com", "zeta.org"]);

        assert!(matches!(repo.delete("alpha.net").await, Ok(true)));
        assert!(matches!(repo.delete("alpha.net").await, Ok(false)));
        assert!(matches!(repo.find_by_name("alpha.net").await, Ok(None)));
    }
}
