//! Provider-side record types and sync summaries.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diff::RecordUpdate;
use crate::error::CoreError;
use crate::types::DnsRecord;

/// Identifies which DNS provider a sync targets.
///
/// The core never talks to the provider itself; the value is handed to the
/// [`ProviderGateway`](crate::ProviderGateway) untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Cloudflare,
    Route53,
    Digitalocean,
}

impl ProviderType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cloudflare => "cloudflare",
            Self::Route53 => "route53",
            Self::Digitalocean => "digitalocean",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloudflare" => Ok(Self::Cloudflare),
            "route53" => Ok(Self::Route53),
            "digitalocean" => Ok(Self::Digitalocean),
            _ => Err(CoreError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// A record as reported by a provider.
///
/// The type is kept as the provider's raw string so the diff engine can report
/// records it does not understand instead of failing the whole sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedRecord {
    /// Provider-specific record identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub record_type: String,
    /// Relative name or FQDN
    pub name: String,
    pub value: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl From<&DnsRecord> for ObservedRecord {
    fn from(record: &DnsRecord) -> Self {
        Self {
            id: record.id.map(|id| id.to_string()),
            record_type: record.record_type.to_string(),
            name: record.name.clone(),
            value: record.value.clone(),
            ttl: record.ttl,
            priority: record.priority,
        }
    }
}

/// Provider key -> observed record.
pub type ObservedRecords = BTreeMap<String, ObservedRecord>;

/// Result of a sync run, planned or applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub provider: String,
    pub zone: String,
    pub dry_run: bool,
    /// Whether the changes were handed to the provider
    pub applied: bool,
    pub records_to_create: Vec<DnsRecord>,
    pub records_to_update: Vec<RecordUpdate>,
    pub records_to_delete: Vec<ObservedRecord>,
    pub errors: Vec<String>,
    pub total_changes: usize,
}

impl SyncSummary {
    /// A summary with no changes, used when the sync cannot get past setup.
    pub fn empty(provider: &str, zone: &str, dry_run: bool) -> Self {
        Self {
            provider: provider.to_string(),
            zone: zone.to_string(),
            dry_run,
            applied: false,
            records_to_create: Vec::new(),
            records_to_update: Vec::new(),
            records_to_delete: Vec::new(),
            errors: Vec::new(),
            total_changes: 0,
        }
    }
}
