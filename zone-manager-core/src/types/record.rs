//! DNS record types.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bind::normalize_soa_value;
use crate::config::DEFAULT_RECORD_TTL;
use crate::error::{CoreError, CoreResult};

/// Storage-assigned record handle
pub type RecordId = i64;

/// The closed set of supported record types.
///
/// Declaration order is the export precedence order, so the derived `Ord`
/// sorts SOA before NS before A and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Start of authority
    Soa,
    /// Name server
    Ns,
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name (alias)
    Cname,
    /// Mail exchange
    Mx,
    /// Text
    Txt,
    /// Service locator
    Srv,
    /// Reverse pointer
    Ptr,
    /// Certificate Authority Authorization
    Caa,
}

impl RecordType {
    /// Every supported type, in precedence order.
    pub const ALL: [Self; 10] = [
        Self::Soa,
        Self::Ns,
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Srv,
        Self::Ptr,
        Self::Caa,
    ];

    /// Uppercase mnemonic as used in zone files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Soa => "SOA",
            Self::Ns => "NS",
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
            Self::Ptr => "PTR",
            Self::Caa => "CAA",
        }
    }

    /// MX and SRV carry a priority; nothing else may.
    #[must_use]
    pub fn requires_priority(self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }

    /// Whether a provider may hold several records of this type at one name.
    #[must_use]
    pub fn is_multi_valued(self) -> bool {
        !matches!(self, Self::Cname | Self::Soa)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownRecordType(s.to_string()))
    }
}

/// A single resource record owned by a zone.
///
/// Equality is `(record_type, name, value, priority)`. TTL and `id` are left out
/// because providers normalize TTLs on their own and ids are storage bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Storage handle, absent until persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Relative owner name, `@` for the apex
    pub name: String,
    /// Type-dependent RDATA text (priority excluded)
    pub value: String,
    /// Time to live in seconds
    pub ttl: u32,
    /// MX/SRV priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl DnsRecord {
    /// Build a record from a type mnemonic, rejecting types outside the closed set.
    ///
    /// Surrounding whitespace is stripped from the name and value.
    pub fn new(
        record_type: &str,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> CoreResult<Self> {
        let name: String = name.into();
        let value: String = value.into();
        Ok(Self::of(record_type.parse()?, name.trim(), value.trim()))
    }

    /// Build a record of a known type with the default TTL.
    pub fn of(record_type: RecordType, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: None,
            record_type,
            name: name.into(),
            value: value.into(),
            ttl: DEFAULT_RECORD_TTL,
            priority: None,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the record sits at the zone apex.
    pub fn is_apex(&self) -> bool {
        self.name == "@"
    }

    /// Value as compared between records. SOA values drop any embedded serial
    /// and default timers; the zone serial is authoritative.
    pub fn comparable_value(&self) -> Cow<'_, str> {
        if self.record_type == RecordType::Soa {
            Cow::Owned(normalize_soa_value(&self.value))
        } else {
            Cow::Borrowed(&self.value)
        }
    }
}

impl PartialEq for DnsRecord {
    fn eq(&self, other: &Self) -> bool {
        self.record_type == other.record_type
            && self.name == other.name
            && self.comparable_value() == other.comparable_value()
            && self.priority == other.priority
    }
}

impl Eq for DnsRecord {}

/// Request payload for adding a record through the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    /// Type mnemonic, case-insensitive
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub value: String,
    /// Defaults to 300 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl NewRecord {
    /// Convert into a [`DnsRecord`], checking the type against the closed set.
    pub fn into_record(self) -> CoreResult<DnsRecord> {
        let mut record = DnsRecord::new(&self.record_type, self.name, self.value)?;
        if let Some(ttl) = self.ttl {
            record.ttl = ttl;
        }
        record.priority = self.priority;
        Ok(record)
    }
}
