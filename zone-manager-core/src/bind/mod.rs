//! BIND (RFC 1035 master file) codec.
//!
//! [`export_zone`] renders a zone deterministically; [`parse_zone`] reads it back
//! and validates the result before handing it out.

mod export;
mod parser;

pub use export::export_zone;
pub use parser::{parse_ttl, parse_zone, parse_zone_with};

use std::borrow::Cow;

use crate::config::SoaTimers;

/// Characters that end or group a token when they appear outside quotes.
pub(crate) fn is_special(c: char) -> bool {
    matches!(c, ';' | '(' | ')')
}

/// Backslash-escape `;`, `(` and `)` outside quoted strings so a value reads
/// back as one piece of RDATA.
pub(crate) fn escape_rdata(value: &str) -> Cow<'_, str> {
    if !value.contains(is_special) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 4);
    let mut in_quotes = false;
    let mut escaped = false;
    for c in value.chars() {
        if escaped {
            escaped = false;
        } else {
            match c {
                '\\' => escaped = true,
                '"' => in_quotes = !in_quotes,
                c if is_special(c) && !in_quotes => out.push('\\'),
                _ => {}
            }
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Expand a stored SOA value to full RDATA with the zone serial.
///
/// - `mname rname` gets the serial and the default timers
/// - `mname rname refresh retry expire minimum` gets the serial inserted
/// - full RDATA has its own serial replaced by `serial`
/// - anything else is returned untouched
pub(crate) fn expand_soa(value: &str, serial: u32) -> String {
    let stored = normalize_soa_value(value);
    let fields: Vec<&str> = stored.split_whitespace().collect();
    match fields.as_slice() {
        [mname, rname] => {
            let [refresh, retry, expire, minimum] = SoaTimers::DEFAULT.as_array();
            format!("{mname} {rname} {serial} {refresh} {retry} {expire} {minimum}")
        }
        [mname, rname, timers @ ..]
            if timers.len() == 4 && timers.iter().all(|t| t.parse::<u32>().is_ok()) =>
        {
            format!("{mname} {rname} {serial} {}", timers.join(" "))
        }
        _ => value.to_string(),
    }
}

/// Split full SOA RDATA into the stored value and the serial it carried.
///
/// Returns `None` unless the RDATA has exactly seven fields with numeric serial
/// and timers. Default timers are dropped from the stored value.
pub(crate) fn collapse_soa(fields: &[String]) -> Option<(String, u32)> {
    let [mname, rname, serial, timers @ ..] = fields else {
        return None;
    };
    let serial = serial.parse::<u32>().ok()?;
    Some((stored_soa(mname, rname, timers)?, serial))
}

/// The stored form of an SOA value: `mname rname`, plus the timers in seconds
/// when they differ from the defaults. An embedded serial is dropped.
///
/// Values of any other shape are returned unchanged.
pub(crate) fn normalize_soa_value(value: &str) -> String {
    let fields: Vec<String> = value.split_whitespace().map(str::to_string).collect();
    let stored = match fields.as_slice() {
        [mname, rname] => Some(format!("{mname} {rname}")),
        [mname, rname, timers @ ..] if timers.len() == 4 => stored_soa(mname, rname, timers),
        _ if fields.len() == 7 => collapse_soa(&fields).map(|(stored, _)| stored),
        _ => None,
    };
    stored.unwrap_or_else(|| value.to_string())
}

fn stored_soa(mname: &str, rname: &str, timers: &[String]) -> Option<String> {
    if timers.len() != 4 {
        return None;
    }
    let mut parsed = [0u32; 4];
    for (slot, token) in parsed.iter_mut().zip(timers) {
        *slot = parse_ttl(token)?;
    }

    if parsed == SoaTimers::DEFAULT.as_array() {
        Some(format!("{mname} {rname}"))
    } else {
        let [refresh, retry, expire, minimum] = parsed;
        Some(format!("{mname} {rname} {refresh} {retry} {expire} {minimum}"))
    }
}
