//! Process-wide defaults and strictness settings.
//!
//! Everything here is read-only once constructed; services receive a copy through
//! [`ServiceContext`](crate::ServiceContext).

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Default TTL for a newly created zone (seconds)
pub const DEFAULT_ZONE_TTL: u32 = 3600;

/// Default TTL for a record created without one (seconds)
pub const DEFAULT_RECORD_TTL: u32 = 300;

/// Authoritative nameservers assigned to a zone created without any
pub const DEFAULT_NAMESERVERS: [&str; 2] = ["ns1.blackroad.io.", "ns2.blackroad.io."];

/// SOA timer fields emitted next to the serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoaTimers {
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl SoaTimers {
    /// Fixed timers written when an SOA value only names `mname rname`.
    pub const DEFAULT: Self = Self {
        refresh: 7200,
        retry: 3600,
        expire: 1_209_600,
        minimum: 3600,
    };

    /// The four timers in RDATA order.
    #[must_use]
    pub fn as_array(&self) -> [u32; 4] {
        [self.refresh, self.retry, self.expire, self.minimum]
    }
}

/// Defaults applied when a zone is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoneDefaults {
    /// Zone default TTL
    pub ttl: u32,
    /// Authoritative nameservers
    pub nameservers: Vec<String>,
}

impl Default for ZoneDefaults {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_ZONE_TTL,
            nameservers: DEFAULT_NAMESERVERS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Optional validation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Reject a CNAME that shares its label with any other record type.
    ///
    /// Duplicate CNAMEs are always rejected; this only adds the exclusivity rule.
    pub strict_cname: bool,
}

impl ValidationOptions {
    /// Options with every optional rule enabled.
    #[must_use]
    pub fn strict() -> Self {
        Self { strict_cname: true }
    }
}

/// Top-level configuration shared by the service layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoneManagerConfig {
    pub zone_defaults: ZoneDefaults,
    pub validation: ValidationOptions,
}

impl ZoneManagerConfig {
    /// Parse a JSON configuration document; missing keys take their defaults.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::SerializationError(e.to_string()))
    }
}
