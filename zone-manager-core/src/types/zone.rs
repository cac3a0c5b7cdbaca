//! Zone aggregate.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::bind::normalize_soa_value;
use crate::config::ZoneDefaults;
use crate::types::{DnsRecord, RecordId, RecordType};
use crate::utils::names::normalize_zone_name;
use crate::utils::serial::{initial_serial, next_serial, today};

/// Storage-assigned zone handle
pub type ZoneId = i64;

/// A DNS zone and the records it owns.
///
/// `nameservers` mirrors the apex NS records whenever the zone has any and
/// holds the default nameservers otherwise; the record mutators keep the two
/// in step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Storage handle, absent until persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ZoneId>,
    /// Lowercase zone name without trailing dot
    pub name: String,
    /// Default TTL in seconds
    pub ttl: u32,
    /// `YYYYMMDDnn` serial
    pub serial: u32,
    /// Authoritative nameservers
    pub nameservers: Vec<String>,
    /// Records in insertion order
    #[serde(default)]
    pub records: Vec<DnsRecord>,
}

impl Zone {
    /// Create an empty zone with the platform defaults and today's serial.
    pub fn new(name: &str) -> Self {
        Self::with_defaults(name, &ZoneDefaults::default(), today())
    }

    /// Create an empty zone from explicit defaults and creation date.
    pub fn with_defaults(name: &str, defaults: &ZoneDefaults, date: NaiveDate) -> Self {
        Self {
            id: None,
            name: normalize_zone_name(name),
            ttl: defaults.ttl,
            serial: initial_serial(date),
            nameservers: defaults.nameservers.clone(),
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Append a record. Apex NS records take over the `nameservers` list and
    /// SOA values are stored without an embedded serial.
    pub fn add_record(&mut self, mut record: DnsRecord) {
        if record.record_type == RecordType::Soa {
            record.value = normalize_soa_value(&record.value);
        }
        let apex_ns = is_apex_ns(&record);
        self.records.push(record);
        if apex_ns {
            self.sync_nameservers();
        }
    }

    /// Remove a record by id; `false` when no record carries that id.
    ///
    /// Removing the last apex NS record resets `nameservers` to the platform
    /// defaults; see [`Zone::reset_nameservers`] for configured ones.
    pub fn remove_record(&mut self, record_id: RecordId) -> bool {
        let Some(index) = self.records.iter().position(|r| r.id == Some(record_id)) else {
            return false;
        };
        let removed = self.records.remove(index);
        if is_apex_ns(&removed) {
            if self.apex_nameservers().is_empty() {
                self.reset_nameservers(&ZoneDefaults::default().nameservers);
            } else {
                self.sync_nameservers();
            }
        }
        true
    }

    /// Fall back to `defaults` when the zone has no apex NS records.
    pub fn reset_nameservers(&mut self, defaults: &[String]) {
        if self.apex_nameservers().is_empty() {
            self.nameservers = defaults.to_vec();
        }
    }

    /// Records of one type, in insertion order.
    pub fn records_of(&self, record_type: RecordType) -> impl Iterator<Item = &DnsRecord> {
        self.records
            .iter()
            .filter(move |r| r.record_type == record_type)
    }

    pub fn has_record_type(&self, record_type: RecordType) -> bool {
        self.records_of(record_type).next().is_some()
    }

    /// Values of the apex NS records, in record order.
    pub fn apex_nameservers(&self) -> Vec<String> {
        self.records_of(RecordType::Ns)
            .filter(|r| r.is_apex())
            .map(|r| r.value.clone())
            .collect()
    }

    /// Advance the serial after a change to the record set.
    pub fn bump_serial(&mut self, date: NaiveDate) {
        self.serial = next_serial(self.serial, date);
    }

    /// Zone-level content equality: name, TTL, serial and nameservers exactly,
    /// records as a multiset under record equality.
    pub fn content_eq(&self, other: &Self) -> bool {
        if self.name != other.name
            || self.ttl != other.ttl
            || self.serial != other.serial
            || self.nameservers != other.nameservers
            || self.records.len() != other.records.len()
        {
            return false;
        }
        let mut ours: Vec<&DnsRecord> = self.records.iter().collect();
        let mut theirs: Vec<&DnsRecord> = other.records.iter().collect();
        ours.sort_by(|a, b| record_sort_key(a).cmp(&record_sort_key(b)));
        theirs.sort_by(|a, b| record_sort_key(a).cmp(&record_sort_key(b)));
        ours == theirs
    }

    fn sync_nameservers(&mut self) {
        let apex = self.apex_nameservers();
        if !apex.is_empty() {
            self.nameservers = apex;
        }
    }
}

fn is_apex_ns(record: &DnsRecord) -> bool {
    record.record_type == RecordType::Ns && record.is_apex()
}

fn record_sort_key(r: &DnsRecord) -> (&str, RecordType, Cow<'_, str>, Option<u32>) {
    (r.name.as_str(), r.record_type, r.comparable_value(), r.priority)
}

/// Zone listing row returned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    pub name: String,
    pub ttl: u32,
    pub serial: u32,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}
