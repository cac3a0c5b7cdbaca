//! Desired-vs-observed record diffing.
//!
//! Records are matched by [`RecordKey`]. CNAME and SOA may only exist once per
//! name, so they match on `(type, name)` and a changed value is an update. Every
//! other type may hold several values at one name, so the value is part of the
//! key and a changed value shows up as a delete plus a create.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{DnsRecord, ObservedRecord, ObservedRecords, RecordType, Zone};
use crate::utils::names::owner_name_in_zone;

/// Identity used to pair a desired record with an observed one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordKey {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Lowercase relative name
    pub name: String,
    /// Present for multi-valued types only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RecordKey {
    pub fn new(record_type: RecordType, name: &str, value: &str) -> Self {
        Self {
            record_type,
            name: name.trim().to_ascii_lowercase(),
            value: record_type
                .is_multi_valued()
                .then(|| value.trim().to_string()),
        }
    }

    pub fn of(record: &DnsRecord) -> Self {
        Self::new(record.record_type, &record.name, &record.value)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {} {}", self.record_type, self.name, value),
            None => write!(f, "{} {}", self.record_type, self.name),
        }
    }
}

/// A record present on both sides whose value, TTL or priority drifted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUpdate {
    pub key: RecordKey,
    pub desired: DnsRecord,
    pub observed: ObservedRecord,
}

/// An observed or desired entry the engine could not classify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffError {
    /// Provider key for observed entries, record key text for desired ones
    pub key: String,
    pub reason: String,
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.reason)
    }
}

/// Changes needed to make the provider match the desired zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDiff {
    pub to_create: Vec<DnsRecord>,
    pub to_update: Vec<RecordUpdate>,
    pub to_delete: Vec<ObservedRecord>,
    pub errors: Vec<DiffError>,
}

impl ZoneDiff {
    pub fn total_changes(&self) -> usize {
        self.to_create.len() + self.to_update.len() + self.to_delete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// Compute the create/update/delete sets between `desired` and `observed`.
///
/// Never fails: entries that cannot be classified are collected in
/// [`ZoneDiff::errors`] and left out of the change sets.
pub fn diff_zone(desired: &Zone, observed: &ObservedRecords) -> ZoneDiff {
    let mut diff = ZoneDiff::default();

    let mut wanted: BTreeMap<RecordKey, &DnsRecord> = BTreeMap::new();
    let mut wanted_order: Vec<RecordKey> = Vec::new();
    for record in &desired.records {
        let key = RecordKey::of(record);
        if wanted.contains_key(&key) {
            diff.errors.push(DiffError {
                key: key.to_string(),
                reason: "duplicate desired record".to_string(),
            });
            continue;
        }
        wanted.insert(key.clone(), record);
        wanted_order.push(key);
    }

    let mut seen: HashSet<RecordKey> = HashSet::new();
    for (provider_key, record) in observed {
        let key = match observed_key(record, &desired.name) {
            Ok(key) => key,
            Err(reason) => {
                diff.errors.push(DiffError {
                    key: provider_key.clone(),
                    reason,
                });
                continue;
            }
        };
        if !seen.insert(key.clone()) {
            diff.errors.push(DiffError {
                key: provider_key.clone(),
                reason: format!("duplicate observed record {key}"),
            });
            continue;
        }

        match wanted.get(&key) {
            None => diff.to_delete.push(record.clone()),
            Some(want) if drifted(want, record) => diff.to_update.push(RecordUpdate {
                key,
                desired: (*want).clone(),
                observed: record.clone(),
            }),
            Some(_) => {}
        }
    }

    diff.to_create = wanted_order
        .into_iter()
        .filter(|key| !seen.contains(key))
        .filter_map(|key| wanted.get(&key).map(|r| (*r).clone()))
        .collect();

    log::debug!(
        "Diff for {}: {} create, {} update, {} delete, {} error(s)",
        desired.name,
        diff.to_create.len(),
        diff.to_update.len(),
        diff.to_delete.len(),
        diff.errors.len()
    );
    diff
}

fn observed_key(record: &ObservedRecord, zone_name: &str) -> Result<RecordKey, String> {
    let record_type: RecordType = record
        .record_type
        .parse()
        .map_err(|_| format!("unknown record type '{}'", record.record_type))?;
    if record.name.trim().is_empty() {
        return Err("record has an empty name".to_string());
    }
    let name = owner_name_in_zone(&record.name, zone_name);
    Ok(RecordKey::new(record_type, &name, &record.value))
}

fn drifted(desired: &DnsRecord, observed: &ObservedRecord) -> bool {
    desired.value.trim() != observed.value.trim()
        || desired.ttl != observed.ttl
        || desired.priority != observed.priority
}

/// The observed mapping a provider holding exactly `zone`'s records would report.
pub fn observed_from_zone(zone: &Zone) -> ObservedRecords {
    zone.records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let key = record
                .id
                .map_or_else(|| format!("local-{i}"), |id| id.to_string());
            (key, ObservedRecord::from(record))
        })
        .collect()
}

/// The observed state a provider should hold after `diff` has been applied to
/// `observed`. Provider keys of untouched and updated records are kept; created
/// records get fresh `created-N` keys.
pub fn apply_diff(observed: &ObservedRecords, diff: &ZoneDiff) -> ObservedRecords {
    let mut next = observed.clone();
    next.retain(|_, record| !diff.to_delete.contains(record));

    for update in &diff.to_update {
        if let Some(slot) = next.values_mut().find(|r| **r == update.observed) {
            let id = slot.id.take();
            *slot = ObservedRecord::from(&update.desired);
            slot.id = id;
        }
    }

    let mut counter = next.len();
    for record in &diff.to_create {
        let key = loop {
            let candidate = format!("created-{counter}");
            counter += 1;
            if !next.contains_key(&candidate) {
                break candidate;
            }
        };
        let mut created = ObservedRecord::from(record);
        created.id = Some(key.clone());
        next.insert(key, created);
    }
    next
}
