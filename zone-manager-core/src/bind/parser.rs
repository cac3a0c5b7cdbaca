//! BIND text -> Zone.
//!
//! Lines are scanned in one pass and every malformed line is reported; a zone is
//! only returned when the whole file parsed and the result validates.

use crate::config::ZoneManagerConfig;
use crate::error::{CoreError, CoreResult, ParseError, ParseErrorKind};
use crate::types::{DnsRecord, RecordType, Zone};
use crate::utils::names::{full_name_to_relative, normalize_zone_name, relative_to_full_name};
use crate::utils::serial::today;
use crate::validation::validate_zone_with;

use super::{collapse_soa, is_special};

/// Parse a zone file with the default configuration.
///
/// `fallback_origin` names the zone when the file has no `$ORIGIN` before its
/// first record.
pub fn parse_zone(text: &str, fallback_origin: Option<&str>) -> CoreResult<Zone> {
    parse_zone_with(text, fallback_origin, &ZoneManagerConfig::default())
}

/// Parse a zone file, using `config` for zone defaults and validation strictness.
pub fn parse_zone_with(
    text: &str,
    fallback_origin: Option<&str>,
    config: &ZoneManagerConfig,
) -> CoreResult<Zone> {
    let mut parser = ZoneParser::new(fallback_origin, config);
    let (lines, mut errors) = logical_lines(text);

    for line in &lines {
        if let Err(kind) = parser.parse_line(line) {
            errors.push(ParseError {
                line: line.number,
                text: line.text.clone(),
                kind,
            });
        }
    }

    if !errors.is_empty() {
        errors.sort_by_key(|e| e.line);
        log::debug!("Zone file rejected with {} line error(s)", errors.len());
        return Err(CoreError::ParseFailed(errors));
    }

    let zone = parser.finish();
    let problems = validate_zone_with(&zone, &config.validation);
    if !problems.is_empty() {
        return Err(CoreError::ValidationFailed(problems));
    }
    Ok(zone)
}

/// Parse a TTL token: plain seconds or BIND units (`1h30m`, `2d`, `1w`).
pub fn parse_ttl(token: &str) -> Option<u32> {
    if !token.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if let Ok(seconds) = token.parse::<u32>() {
        return Some(seconds);
    }

    let mut total: u32 = 0;
    let mut digits = String::new();
    for c in token.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit: u32 = match c.to_ascii_lowercase() {
            's' => 1,
            'm' => 60,
            'h' => 3_600,
            'd' => 86_400,
            'w' => 604_800,
            _ => return None,
        };
        let amount: u32 = digits.parse().ok()?;
        total = total.checked_add(amount.checked_mul(unit)?)?;
        digits.clear();
    }
    if !digits.is_empty() {
        total = total.checked_add(digits.parse().ok()?)?;
    }
    Some(total)
}

/// One record or directive after comment stripping and parenthesis joining.
#[derive(Debug)]
struct LogicalLine {
    /// Line number of the first physical line
    number: usize,
    /// Comment-free text, parentheses kept, as shown in errors
    text: String,
    /// Whitespace-separated tokens; quoted strings stay whole
    tokens: Vec<String>,
    /// The line started with whitespace, so it reuses the previous owner
    inherits_owner: bool,
}

/// Strip comments, join parenthesized groups and tokenize.
fn logical_lines(text: &str) -> (Vec<LogicalLine>, Vec<ParseError>) {
    let mut lines = Vec::new();
    let mut errors = Vec::new();
    let mut pending: Option<(usize, bool, String)> = None;
    let mut depth: i32 = 0;

    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        let stripped = strip_comment(raw);
        let (opens, closes) = count_parens(stripped);

        let (start, inherits, mut buffer) = match pending.take() {
            Some(open) => open,
            None => {
                if stripped.trim().is_empty() {
                    continue;
                }
                let inherits = raw.starts_with([' ', '\t']);
                (number, inherits, String::new())
            }
        };
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(stripped.trim());

        depth += opens;
        depth -= closes;
        if depth < 0 {
            errors.push(ParseError {
                line: start,
                text: buffer,
                kind: ParseErrorKind::UnbalancedParentheses,
            });
            depth = 0;
            continue;
        }
        if depth > 0 {
            pending = Some((start, inherits, buffer));
            continue;
        }

        lines.push(LogicalLine {
            number: start,
            tokens: tokenize(&buffer),
            text: buffer,
            inherits_owner: inherits,
        });
    }

    if let Some((start, _, buffer)) = pending {
        errors.push(ParseError {
            line: start,
            text: buffer,
            kind: ParseErrorKind::UnbalancedParentheses,
        });
    }

    (lines, errors)
}

/// Cut a line at the first `;` outside a quoted string.
fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parentheses outside quoted strings.
fn count_parens(line: &str) -> (i32, i32) {
    let mut in_quotes = false;
    let mut escaped = false;
    let (mut opens, mut closes) = (0, 0);
    for c in line.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => opens += 1,
            ')' if !in_quotes => closes += 1,
            _ => {}
        }
    }
    (opens, closes)
}

/// Split on whitespace, keeping `"quoted strings"` as single tokens and
/// dropping grouping parentheses. `\;`, `\(` and `\)` outside quotes become
/// the bare character; other escapes are kept as written.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for c in line.chars() {
        if escaped {
            if in_quotes || !is_special(c) {
                current.push('\\');
            }
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => {
                current.push(c);
                in_quotes = !in_quotes;
            }
            '(' | ')' if !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if escaped {
        current.push('\\');
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Running state while walking the logical lines.
struct ZoneParser<'a> {
    config: &'a ZoneManagerConfig,
    /// Zone name, fixed by the first `$ORIGIN` or the fallback
    zone_name: String,
    zone_named: bool,
    /// Current `$ORIGIN`, used to qualify relative owner names
    origin: String,
    /// Default TTL from the latest `$TTL`
    default_ttl: u32,
    ttl_seen: bool,
    last_owner: Option<String>,
    soa_serial: Option<u32>,
    records: Vec<DnsRecord>,
}

impl<'a> ZoneParser<'a> {
    fn new(fallback_origin: Option<&str>, config: &'a ZoneManagerConfig) -> Self {
        let zone_name = fallback_origin.map(normalize_zone_name).unwrap_or_default();
        Self {
            config,
            origin: zone_name.clone(),
            zone_name,
            zone_named: false,
            default_ttl: config.zone_defaults.ttl,
            ttl_seen: false,
            last_owner: None,
            soa_serial: None,
            records: Vec::new(),
        }
    }

    fn parse_line(&mut self, line: &LogicalLine) -> Result<(), ParseErrorKind> {
        let Some(first) = line.tokens.first() else {
            return Ok(());
        };
        if !line.inherits_owner && first.starts_with('$') {
            return self.parse_directive(&line.tokens);
        }
        self.parse_record(line)
    }

    fn parse_directive(&mut self, tokens: &[String]) -> Result<(), ParseErrorKind> {
        let directive = tokens[0].to_ascii_uppercase();
        match directive.as_str() {
            "$ORIGIN" => {
                let origin = tokens.get(1).ok_or_else(|| missing("origin name"))?;
                self.origin = normalize_zone_name(origin);
                if !self.zone_named {
                    self.zone_name = self.origin.clone();
                    self.zone_named = true;
                }
                Ok(())
            }
            "$TTL" => {
                let token = tokens.get(1).ok_or_else(|| missing("TTL value"))?;
                self.default_ttl =
                    parse_ttl(token).ok_or_else(|| ParseErrorKind::InvalidTtl(token.clone()))?;
                self.ttl_seen = true;
                Ok(())
            }
            _ => Err(ParseErrorKind::UnsupportedDirective(tokens[0].clone())),
        }
    }

    fn parse_record(&mut self, line: &LogicalLine) -> Result<(), ParseErrorKind> {
        // Records before any $ORIGIN lock the fallback in as the zone name.
        self.zone_named = true;

        let mut tokens = line.tokens.iter();
        let owner = if line.inherits_owner {
            self.last_owner
                .clone()
                .ok_or(ParseErrorKind::MissingRecordName)?
        } else {
            let token = tokens.next().ok_or(ParseErrorKind::MissingRecordName)?;
            let owner = self.resolve_owner(token);
            self.last_owner = Some(owner.clone());
            owner
        };

        let mut ttl = None;
        let mut class_seen = false;
        let mut type_token = None;
        for token in tokens.by_ref() {
            if !class_seen && token.eq_ignore_ascii_case("IN") {
                class_seen = true;
            } else if ttl.is_none() && token.starts_with(|c: char| c.is_ascii_digit()) {
                ttl = Some(parse_ttl(token).ok_or_else(|| ParseErrorKind::InvalidTtl(token.clone()))?);
            } else {
                type_token = Some(token);
                break;
            }
        }

        let type_token = type_token.ok_or_else(|| missing("record type"))?;
        let record_type: RecordType = type_token
            .parse()
            .map_err(|_| ParseErrorKind::UnknownRecordType(type_token.clone()))?;

        let mut rdata: Vec<String> = tokens.cloned().collect();
        if rdata.is_empty() {
            return Err(missing("record value"));
        }

        let mut priority = None;
        if record_type.requires_priority() {
            let token = rdata.remove(0);
            priority = Some(
                token
                    .parse::<u32>()
                    .map_err(|_| ParseErrorKind::InvalidPriority(token.clone()))?,
            );
            if rdata.is_empty() {
                return Err(missing("record value"));
            }
        }

        let value = if record_type == RecordType::Soa {
            match collapse_soa(&rdata) {
                Some((value, serial)) => {
                    self.soa_serial = Some(serial);
                    value
                }
                None => rdata.join(" "),
            }
        } else {
            rdata.join(" ")
        };

        let mut record = DnsRecord::of(record_type, owner, value)
            .with_ttl(ttl.unwrap_or(self.default_ttl));
        record.priority = priority;
        self.records.push(record);
        Ok(())
    }

    /// Owner name relative to the zone, honouring the current `$ORIGIN`.
    fn resolve_owner(&self, token: &str) -> String {
        if token == "@" && self.origin == self.zone_name {
            return "@".to_string();
        }
        if self.zone_name.is_empty() {
            return full_name_to_relative(token, "");
        }
        let full = relative_to_full_name(token, &self.origin);
        full_name_to_relative(&full, &self.zone_name)
    }

    fn finish(self) -> Zone {
        let mut zone = Zone::with_defaults(&self.zone_name, &self.config.zone_defaults, today());
        if self.ttl_seen {
            zone.ttl = self.default_ttl;
        }
        if let Some(serial) = self.soa_serial {
            zone.serial = serial;
        }
        for record in self.records {
            zone.add_record(record);
        }
        zone
    }
}

fn missing(expected: &str) -> ParseErrorKind {
    ParseErrorKind::MissingField {
        expected: expected.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::test_utils::{minimal_valid_zone, sample_day};
    use crate::{export_zone, ValidationOptions, ZoneDefaults};

    const BASIC: &str = "\
$ORIGIN example.com.
$TTL 3600
@ 300 IN SOA ns1.example.com. hostmaster.example.com. 2024050101 7200 3600 1209600 3600
@ 300 IN NS ns1.example.com.
@ 300 IN MX 10 mail.example.com
www 300 IN A 93.184.216.34
";

    #[test]
    fn parses_basic_zone() {
        let res = parse_zone(BASIC, None);
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(zone) = res else {
            return;
        };
        assert_eq!(zone.name, "example.com");
        assert_eq!(zone.ttl, 3600);
        assert_eq!(zone.serial, 2_024_050_101);
        assert_eq!(zone.nameservers, vec!["ns1.example.com.".to_string()]);
        assert_eq!(zone.records.len(), 4);

        let soa = zone.records_of(RecordType::Soa).next();
        assert_eq!(
            soa.map(|r| r.value.as_str()),
            Some("ns1.example.com. hostmaster.example.com.")
        );
        let mx = zone.records_of(RecordType::Mx).next();
        assert_eq!(mx.and_then(|r| r.priority), Some(10));
        assert_eq!(mx.map(|r| r.value.as_str()), Some("mail.example.com"));
    }

    #[test]
    fn round_trip_preserves_content() {
        let mut zone = minimal_valid_zone();
        zone.add_record(DnsRecord::of(RecordType::A, "www", "93.184.216.34").with_ttl(600));
        zone.add_record(DnsRecord::of(RecordType::Mx, "@", "mail.example.com").with_priority(10));
        zone.add_record(DnsRecord::of(RecordType::Txt, "@", "\"v=spf1 mx -all\""));
        zone.add_record(DnsRecord::of(RecordType::Srv, "_sip._tcp", "5 5060 sip.example.com.").with_priority(10));
        zone.add_record(DnsRecord::of(RecordType::Caa, "@", "0 issue \"letsencrypt.org\""));

        let res = parse_zone(&export_zone(&zone), None);
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(parsed) = res else {
            return;
        };
        assert!(parsed.content_eq(&zone), "{parsed:#?}\n!=\n{zone:#?}");
        assert!(parsed.records.iter().all(|r| {
            zone.records.iter().any(|z| z == r && z.ttl == r.ttl)
        }));
    }

    fn assert_round_trips(zone: &Zone) {
        let text = export_zone(zone);
        let res = parse_zone(&text, None);
        assert!(res.is_ok(), "unexpected result: {res:?}\n{text}");
        let Ok(parsed) = res else {
            return;
        };
        assert!(parsed.content_eq(zone), "{parsed:#?}\n!=\n{zone:#?}");
    }

    #[test]
    fn full_soa_rdata_round_trips_with_zone_serial() {
        let mut zone = Zone::with_defaults("example.com", &ZoneDefaults::default(), sample_day());
        zone.records.push(DnsRecord::of(
            RecordType::Soa,
            "@",
            "ns1.example.com. host.example.com. 2020010101 7200 3600 1209600 3600",
        ));
        zone.add_record(DnsRecord::of(RecordType::Ns, "@", "ns1.example.com."));
        assert_round_trips(&zone);

        let text = export_zone(&zone);
        assert!(text.contains("IN SOA ns1.example.com. host.example.com. 2024050101 "));
        assert!(!text.contains("2020010101"));

        zone.records[0].value =
            "ns1.example.com. host.example.com. 2020010101 900 300 604800 60".to_string();
        assert_round_trips(&zone);
    }

    #[test]
    fn zone_without_apex_ns_round_trips() {
        let mut zone = Zone::with_defaults("example.com", &ZoneDefaults::default(), sample_day());
        zone.add_record(DnsRecord::of(
            RecordType::Soa,
            "@",
            "ns1.example.com. hostmaster.example.com.",
        ));
        zone.add_record(DnsRecord::of(RecordType::Ns, "sub", "ns.delegated.net."));
        zone.add_record(DnsRecord::of(RecordType::A, "www", "10.0.0.1"));
        assert_round_trips(&zone);
    }

    #[test]
    fn zone_round_trips_after_last_apex_ns_is_removed() {
        let mut zone = minimal_valid_zone();
        for (id, record) in (1..).zip(zone.records.iter_mut()) {
            record.id = Some(id);
        }
        zone.add_record(DnsRecord::of(RecordType::Ns, "sub", "ns.delegated.net."));
        let apex_ns = zone
            .records
            .iter()
            .find(|r| r.record_type == RecordType::Ns && r.is_apex())
            .and_then(|r| r.id);
        let Some(apex_ns) = apex_ns else {
            return;
        };

        assert!(zone.remove_record(apex_ns));
        assert_eq!(zone.nameservers, ZoneDefaults::default().nameservers);
        assert_round_trips(&zone);
    }

    #[test]
    fn txt_with_special_characters_round_trips() {
        let mut zone = minimal_valid_zone();
        zone.add_record(DnsRecord::of(RecordType::Txt, "_dmarc", "v=DMARC1; p=none"));
        zone.add_record(DnsRecord::of(
            RecordType::Txt,
            "mail._domainkey",
            "v=DKIM1; k=rsa; p=MIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQC",
        ));
        zone.add_record(DnsRecord::of(RecordType::Txt, "quoted", "\"say \\\"hi\\\"; ok\""));
        zone.add_record(DnsRecord::of(RecordType::Txt, "parens", "note (draft)"));
        zone.add_record(DnsRecord::of(RecordType::Caa, "@", "0 iodef mailto:ops@example.com;x"));
        assert_round_trips(&zone);
    }

    #[test]
    fn escaped_semicolon_is_part_of_the_value() {
        let text = format!("{BASIC}txt IN TXT v=DMARC1\\; p=none ; comment\n");
        let res = parse_zone(&text, None);
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(zone) = res else {
            return;
        };
        let txt = zone.records_of(RecordType::Txt).next();
        assert_eq!(txt.map(|r| r.value.as_str()), Some("v=DMARC1; p=none"));
    }

    #[test]
    fn quoted_semicolons_survive_comment_stripping() {
        let text = format!("{BASIC}txt IN TXT \"a;b\" ; trailing comment\n");
        let res = parse_zone(&text, None);
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(zone) = res else {
            return;
        };
        let txt = zone.records_of(RecordType::Txt).next();
        assert_eq!(txt.map(|r| r.value.as_str()), Some("\"a;b\""));
        assert_eq!(txt.map(|r| r.ttl), Some(3600));
    }

    #[test]
    fn parenthesized_soa_spans_lines() {
        let text = "\
$ORIGIN example.com.
$TTL 1h
@ IN SOA ns1.example.com. hostmaster.example.com. (
        2024060102 ; serial
        7200 3600 1209600 3600 )
@ NS ns1.example.com.
";
        let res = parse_zone(text, None);
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(zone) = res else {
            return;
        };
        assert_eq!(zone.serial, 2_024_060_102);
        assert_eq!(zone.ttl, 3600);
        assert_eq!(zone.records.len(), 2);
    }

    #[test]
    fn ttl_and_class_in_either_order() {
        let text = format!("{BASIC}a IN 60 A 10.0.0.1\nb 2m IN A 10.0.0.2\n");
        let res = parse_zone(&text, None);
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(zone) = res else {
            return;
        };
        let ttls: Vec<(String, u32)> = zone
            .records_of(RecordType::A)
            .map(|r| (r.name.clone(), r.ttl))
            .collect();
        assert!(ttls.contains(&("a".to_string(), 60)));
        assert!(ttls.contains(&("b".to_string(), 120)));
    }

    #[test]
    fn continuation_line_reuses_previous_owner() {
        let text = format!("{BASIC}mail 300 IN A 10.0.0.5\n    300 IN AAAA 2001:db8::5\n");
        let res = parse_zone(&text, None);
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(zone) = res else {
            return;
        };
        let aaaa = zone.records_of(RecordType::Aaaa).next();
        assert_eq!(aaaa.map(|r| r.name.as_str()), Some("mail"));
    }

    #[test]
    fn continuation_without_owner_is_rejected() {
        let text = "$ORIGIN example.com.\n  300 IN A 10.0.0.1\n";
        let res = parse_zone(text, None);
        assert!(
            matches!(
                &res,
                Err(CoreError::ParseFailed(errors))
                    if errors.len() == 1
                        && errors[0].line == 2
                        && errors[0].kind == ParseErrorKind::MissingRecordName
            ),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn collects_every_line_error() {
        let text = "\
$ORIGIN example.com.
$INCLUDE other.zone
www 300 IN BOGUS 1.2.3.4
mail 300 IN MX ten mail.example.com.
bad 9x IN A 1.2.3.4
short 300 IN A
";
        let res = parse_zone(text, None);
        assert!(
            matches!(&res, Err(CoreError::ParseFailed(_))),
            "unexpected result: {res:?}"
        );
        let Err(CoreError::ParseFailed(errors)) = res else {
            return;
        };
        let summary: Vec<(usize, ParseErrorKind)> =
            errors.into_iter().map(|e| (e.line, e.kind)).collect();
        assert_eq!(
            summary,
            vec![
                (2, ParseErrorKind::UnsupportedDirective("$INCLUDE".to_string())),
                (3, ParseErrorKind::UnknownRecordType("BOGUS".to_string())),
                (4, ParseErrorKind::InvalidPriority("ten".to_string())),
                (5, ParseErrorKind::InvalidTtl("9x".to_string())),
                (
                    6,
                    ParseErrorKind::MissingField {
                        expected: "record value".to_string()
                    }
                ),
            ]
        );
    }

    #[test]
    fn unclosed_parenthesis_is_reported_at_start_line() {
        let text = "$ORIGIN example.com.\n@ IN SOA ns1. admin. ( 1 2 3\n";
        let res = parse_zone(text, None);
        assert!(matches!(
            &res,
            Err(CoreError::ParseFailed(errors))
                if errors[0].line == 2 && errors[0].kind == ParseErrorKind::UnbalancedParentheses
        ));
    }

    #[test]
    fn absolute_owner_names_are_relativized() {
        let text = "\
$ORIGIN example.com.
example.com. 300 IN SOA ns1.example.com. hostmaster.example.com.
example.com. 300 IN NS ns1.example.com.
www.example.com. 300 IN A 10.0.0.1
";
        let res = parse_zone(text, None);
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(zone) = res else {
            return;
        };
        let names: Vec<&str> = zone.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["@", "@", "www"]);
    }

    #[test]
    fn fallback_origin_names_the_zone() {
        let text = "\
@ 300 IN SOA ns1.example.org. hostmaster.example.org.
@ 300 IN NS ns1.example.org.
";
        let res = parse_zone(text, Some("Example.ORG."));
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(zone) = res else {
            return;
        };
        assert_eq!(zone.name, "example.org");
        assert_eq!(zone.ttl, 3600);
    }

    #[test]
    fn missing_origin_fails_validation() {
        let text = "@ 300 IN SOA ns1.example.org. hostmaster.example.org.\n@ 300 IN NS ns1.example.org.\n";
        let res = parse_zone(text, None);
        assert!(matches!(
            &res,
            Err(CoreError::ValidationFailed(errors))
                if errors.contains(&ValidationError::InvalidZoneName { name: String::new() })
        ));
    }

    #[test]
    fn parsed_zone_is_validated() {
        let text = "$ORIGIN example.com.\nwww 300 IN A 999.1.1.1\n";
        let res = parse_zone(text, None);
        assert!(
            matches!(&res, Err(CoreError::ValidationFailed(_))),
            "unexpected result: {res:?}"
        );
        let Err(CoreError::ValidationFailed(errors)) = res else {
            return;
        };
        assert!(errors.contains(&ValidationError::MissingSoa));
        assert!(errors.contains(&ValidationError::MissingNs));
        assert!(errors
            .iter()
            .any(|e| matches!(e.kind(), ValidationError::InvalidAddressFormat { .. })));
    }

    #[test]
    fn strict_config_applies_to_import() {
        let text = format!("{BASIC}alias 300 IN TXT hello\nalias 300 IN CNAME other.example.net.\n");
        assert!(parse_zone(&text, None).is_ok());
        let config = ZoneManagerConfig {
            validation: ValidationOptions::strict(),
            ..ZoneManagerConfig::default()
        };
        assert!(matches!(
            parse_zone_with(&text, None, &config),
            Err(CoreError::ValidationFailed(_))
        ));
    }

    #[test]
    fn nested_origin_qualifies_relative_names() {
        let text = format!("{BASIC}$ORIGIN lab.example.com.\nhost 300 IN A 10.1.0.1\n@ 300 IN A 10.1.0.2\n");
        let res = parse_zone(&text, None);
        assert!(res.is_ok(), "unexpected result: {res:?}");
        let Ok(zone) = res else {
            return;
        };
        assert_eq!(zone.name, "example.com");
        let names: Vec<&str> = zone
            .records_of(RecordType::A)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["www", "host.lab", "lab"]);
    }

    #[test]
    fn ttl_units() {
        assert_eq!(parse_ttl("300"), Some(300));
        assert_eq!(parse_ttl("1h"), Some(3600));
        assert_eq!(parse_ttl("1h30m"), Some(5400));
        assert_eq!(parse_ttl("1W"), Some(604_800));
        assert_eq!(parse_ttl("2d"), Some(172_800));
        assert_eq!(parse_ttl("h"), None);
        assert_eq!(parse_ttl("9x"), None);
        assert_eq!(parse_ttl("99999999999"), None);
    }
}
