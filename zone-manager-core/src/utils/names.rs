//! Domain name normalization.

/// Strip surrounding whitespace and a single trailing dot.
pub fn normalize_domain_name(name: &str) -> String {
    let trimmed = name.trim();
    trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
}

/// Canonical zone name: trimmed, lowercase, no trailing dot.
pub fn normalize_zone_name(name: &str) -> String {
    normalize_domain_name(name).to_ascii_lowercase()
}

/// Convert an owner name to a name relative to `zone_name`.
///
/// - `"www.example.com."` + `"example.com"` -> `"www"`
/// - `"example.com"` + `"example.com"` -> `"@"`
/// - names outside the zone are returned normalized but otherwise untouched
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_zone_name(zone_name);
    let lower = full.to_ascii_lowercase();

    if zone.is_empty() {
        full
    } else if lower == zone {
        "@".to_string()
    } else if lower.ends_with(&format!(".{zone}")) {
        full[..full.len() - zone.len() - 1].to_string()
    } else {
        full
    }
}

/// Convert a relative owner name to a fully-qualified name (no trailing dot).
///
/// - `"www"` + `"example.com"` -> `"www.example.com"`
/// - `"@"` + `"example.com"` -> `"example.com"`
pub fn relative_to_full_name(relative_name: &str, zone_name: &str) -> String {
    let zone = normalize_zone_name(zone_name);

    if relative_name == "@" || relative_name.is_empty() {
        zone
    } else if let Some(absolute) = relative_name.strip_suffix('.') {
        absolute.to_string()
    } else {
        format!("{relative_name}.{zone}")
    }
}

/// Relativize an owner name that came from outside (zone file, provider).
///
/// Absolute names (trailing dot) and FQDNs ending in the zone are made relative;
/// anything else is assumed to already be relative.
pub fn owner_name_in_zone(name: &str, zone_name: &str) -> String {
    let trimmed = name.trim();
    if trimmed == "@" {
        return "@".to_string();
    }
    let relative = full_name_to_relative(trimmed, zone_name);
    if trimmed.ends_with('.') || relative == "@" || relative.len() < trimmed.len() {
        relative
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_names_are_lowercased_without_dot() {
        assert_eq!(normalize_zone_name(" Example.COM. "), "example.com");
        assert_eq!(normalize_zone_name("example.com"), "example.com");
    }

    #[test]
    fn full_to_relative() {
        assert_eq!(full_name_to_relative("www.example.com.", "example.com"), "www");
        assert_eq!(full_name_to_relative("Example.com", "example.com"), "@");
        assert_eq!(full_name_to_relative("a.b.example.com", "example.com."), "a.b");
        assert_eq!(full_name_to_relative("other.org.", "example.com"), "other.org");
    }

    #[test]
    fn relative_to_full() {
        assert_eq!(relative_to_full_name("www", "example.com"), "www.example.com");
        assert_eq!(relative_to_full_name("@", "example.com."), "example.com");
        assert_eq!(relative_to_full_name("ns.other.org.", "example.com"), "ns.other.org");
    }

    #[test]
    fn owner_names_from_outside() {
        assert_eq!(owner_name_in_zone("www", "example.com"), "www");
        assert_eq!(owner_name_in_zone("@", "example.com"), "@");
        assert_eq!(owner_name_in_zone("mail.example.com", "example.com"), "mail");
        assert_eq!(owner_name_in_zone("example.com.", "example.com"), "@");
        assert_eq!(owner_name_in_zone("_sip._tcp", "example.com"), "_sip._tcp");
    }
}
