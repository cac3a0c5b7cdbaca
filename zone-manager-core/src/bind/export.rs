//! Zone -> BIND text.

use std::fmt::Write as _;

use super::{escape_rdata, expand_soa};
use crate::types::{DnsRecord, RecordType, Zone};

/// Render a zone as a BIND master file.
///
/// Output order: `$ORIGIN`/`$TTL` header, SOA records, apex NS records (or the
/// zone's `nameservers` when it has no NS records at all), then every other
/// record by name and type precedence. Identical zones render to identical
/// bytes.
///
/// The body puts apex records first rather than sorting `@` as a plain
/// string: `@` falls between digits and letters, so a label like `1host`
/// would otherwise land between the SOA/NS header and the rest of the apex.
///
/// `;`, `(` and `)` outside quotes are backslash-escaped so values such as an
/// unquoted `v=DMARC1; p=none` read back whole.
pub fn export_zone(zone: &Zone) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "$ORIGIN {}.", zone.name);
    let _ = writeln!(out, "$TTL {}", zone.ttl);

    for record in zone.records_of(RecordType::Soa) {
        let value = expand_soa(&record.value, zone.serial);
        push_line(&mut out, &record.name, record.ttl, RecordType::Soa, None, &value);
    }

    let apex_ns: Vec<&DnsRecord> = zone
        .records_of(RecordType::Ns)
        .filter(|r| r.is_apex())
        .collect();
    if !zone.has_record_type(RecordType::Ns) {
        for ns in &zone.nameservers {
            push_line(&mut out, "@", zone.ttl, RecordType::Ns, None, ns);
        }
    } else {
        for record in apex_ns {
            write_record(&mut out, record);
        }
    }

    let mut rest: Vec<&DnsRecord> = zone
        .records
        .iter()
        .filter(|r| !is_header_record(r))
        .collect();
    rest.sort_by(|a, b| {
        (!a.is_apex(), a.name.as_str(), a.record_type).cmp(&(
            !b.is_apex(),
            b.name.as_str(),
            b.record_type,
        ))
    });
    for record in rest {
        write_record(&mut out, record);
    }

    out
}

/// SOA and apex NS records, which are written ahead of the sorted body.
fn is_header_record(record: &DnsRecord) -> bool {
    match record.record_type {
        RecordType::Soa => true,
        RecordType::Ns => record.is_apex(),
        _ => false,
    }
}

fn write_record(out: &mut String, record: &DnsRecord) {
    push_line(
        out,
        &record.name,
        record.ttl,
        record.record_type,
        record.priority,
        &record.value,
    );
}

fn push_line(
    out: &mut String,
    name: &str,
    ttl: u32,
    record_type: RecordType,
    priority: Option<u32>,
    value: &str,
) {
    let value = escape_rdata(value);
    match priority {
        Some(priority) => {
            let _ = writeln!(out, "{name} {ttl} IN {record_type} {priority} {value}");
        }
        None => {
            let _ = writeln!(out, "{name} {ttl} IN {record_type} {value}");
        }
    }
}
