//! Record and zone validation.
//!
//! Each record type carries its own value rule; the common field checks run for
//! every type. Nothing here fails fast: every defect is collected.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::config::ValidationOptions;
use crate::error::ValidationError;
use crate::types::{DnsRecord, RecordType, Zone};
use crate::utils::serial::is_valid_serial;

/// Longest hostname in presentation form, trailing dot excluded
const MAX_HOSTNAME_LEN: usize = 253;

/// Longest single label
const MAX_LABEL_LEN: usize = 63;

/// Largest MX/SRV priority
const MAX_PRIORITY: u32 = 65_535;

/// Validate a single record; an empty result means the record is valid.
pub fn validate_record(record: &DnsRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if record.name.trim().is_empty() {
        errors.push(missing("name"));
    }
    if record.ttl == 0 {
        errors.push(ValidationError::InvalidTtl { ttl: record.ttl });
    }

    if record.record_type.requires_priority() {
        match record.priority {
            None => errors.push(missing("priority")),
            Some(priority) if priority > MAX_PRIORITY => {
                errors.push(ValidationError::PriorityOutOfRange { priority });
            }
            Some(_) => {}
        }
    } else if record.priority.is_some() {
        errors.push(ValidationError::UnexpectedPriority {
            record_type: record.record_type,
        });
    }

    if let Some(error) = check_value(record.record_type, &record.value) {
        errors.push(error);
    }

    errors
}

/// Type-specific value rule.
///
/// Values are checked as stored: surrounding whitespace makes an address or
/// hostname invalid.
fn check_value(record_type: RecordType, value: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        return Some(missing("value"));
    }

    match record_type {
        RecordType::A => value.parse::<Ipv4Addr>().err().map(|_| {
            ValidationError::InvalidAddressFormat {
                record_type,
                value: value.to_string(),
            }
        }),
        RecordType::Aaaa => value.parse::<Ipv6Addr>().err().map(|_| {
            ValidationError::InvalidAddressFormat {
                record_type,
                value: value.to_string(),
            }
        }),
        RecordType::Cname | RecordType::Ns | RecordType::Ptr | RecordType::Mx => {
            (!is_valid_hostname(value)).then(|| ValidationError::InvalidHostnameFormat {
                value: value.to_string(),
            })
        }
        RecordType::Txt | RecordType::Soa | RecordType::Srv | RecordType::Caa => None,
    }
}

fn missing(field: &str) -> ValidationError {
    ValidationError::MissingRequiredField {
        field: field.to_string(),
    }
}

/// Hostname syntax: dot-joined labels of 1-63 letters, digits or hyphens,
/// no label starting or ending with `-`, at most one trailing dot and 253
/// characters overall.
pub fn is_valid_hostname(value: &str) -> bool {
    let host = value.strip_suffix('.').unwrap_or(value);
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

/// Zone name syntax: non-empty, only `[A-Za-z0-9._-]`.
pub fn is_valid_zone_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}

/// Validate a zone with the default (lenient) options.
pub fn validate_zone(zone: &Zone) -> Vec<ValidationError> {
    validate_zone_with(zone, &ValidationOptions::default())
}

/// Validate a whole zone: zone fields, required SOA/NS, every record, and the
/// CNAME rules.
pub fn validate_zone_with(zone: &Zone, options: &ValidationOptions) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !is_valid_zone_name(&zone.name) {
        errors.push(ValidationError::InvalidZoneName {
            name: zone.name.clone(),
        });
    }
    if zone.ttl == 0 {
        errors.push(ValidationError::InvalidTtl { ttl: zone.ttl });
    }
    if !is_valid_serial(zone.serial) {
        errors.push(ValidationError::InvalidSerial {
            serial: zone.serial,
        });
    }

    if !zone.has_record_type(RecordType::Soa) {
        errors.push(ValidationError::MissingSoa);
    }
    if !zone.has_record_type(RecordType::Ns) {
        errors.push(ValidationError::MissingNs);
    }

    for record in &zone.records {
        errors.extend(
            validate_record(record)
                .into_iter()
                .map(|e| ValidationError::in_record(record.record_type, &record.name, e)),
        );
    }

    errors.extend(check_cnames(zone, options));
    errors
}

/// Duplicate CNAMEs always; CNAME exclusivity only in strict mode.
fn check_cnames(zone: &Zone, options: &ValidationOptions) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut cname_counts: HashMap<String, usize> = HashMap::new();
    let mut cname_order: Vec<String> = Vec::new();
    for record in zone.records_of(RecordType::Cname) {
        let key = record.name.to_ascii_lowercase();
        let count = cname_counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            cname_order.push(key);
        }
        *count += 1;
    }

    for name in &cname_order {
        if cname_counts.get(name).copied().unwrap_or(0) > 1 {
            errors.push(ValidationError::DuplicateCname { name: name.clone() });
        }
    }

    if options.strict_cname {
        let cname_names: HashSet<&String> = cname_order.iter().collect();
        let mut conflicts: BTreeSet<(String, RecordType)> = BTreeSet::new();
        for record in &zone.records {
            let key = record.name.to_ascii_lowercase();
            if record.record_type != RecordType::Cname && cname_names.contains(&key) {
                conflicts.insert((key, record.record_type));
            }
        }
        errors.extend(
            conflicts
                .into_iter()
                .map(|(name, other)| ValidationError::CnameConflict { name, other }),
        );
    }

    errors
}
