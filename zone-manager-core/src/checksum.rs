//! Zone content fingerprint.

use sha2::{Digest, Sha256};

use crate::types::{DnsRecord, Zone};
use crate::utils::names::normalize_zone_name;

/// Separates fields within a record
const FIELD_SEP: u8 = 0x1F;

/// Terminates a record
const RECORD_SEP: u8 = 0x1E;

/// SHA-256 over the zone's canonical content, as 64 lowercase hex characters.
///
/// Records are hashed in sorted order, so insertion order does not matter. The
/// serial and storage ids are left out: two zones with the same name, TTL and
/// records hash the same.
pub fn zone_checksum(zone: &Zone) -> String {
    let mut records: Vec<&DnsRecord> = zone.records.iter().collect();
    records.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    let mut hasher = Sha256::new();
    for record in records {
        let priority = record
            .priority
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        let ttl = record.ttl.to_string();
        let fields: [&[u8]; 5] = [
            record.name.as_bytes(),
            record.record_type.as_str().as_bytes(),
            record.value.as_bytes(),
            priority.as_bytes(),
            ttl.as_bytes(),
        ];
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                hasher.update([FIELD_SEP]);
            }
            hasher.update(field);
        }
        hasher.update([RECORD_SEP]);
    }
    hasher.update(normalize_zone_name(&zone.name).as_bytes());
    hasher.update([FIELD_SEP]);
    hasher.update(zone.ttl.to_string().as_bytes());

    hex::encode(hasher.finalize())
}

/// `(name, type, value, priority, ttl)`; a missing priority sorts first.
fn sort_key(record: &DnsRecord) -> (&str, &str, &str, Option<u32>, u32) {
    (
        record.name.as_str(),
        record.record_type.as_str(),
        record.value.as_str(),
        record.priority,
        record.ttl,
    )
}
