//! Zone Manager Core Library
//!
//! Pure zone logic plus the service layer that wires it to storage and providers:
//! - Record model (`types`)
//! - Per-record and whole-zone validation (`validation`)
//! - BIND / RFC 1035 master file codec (`bind`)
//! - Content fingerprinting (`checksum`)
//! - Desired-vs-observed diffing (`diff`)
//!
//! Storage and provider access are abstracted through traits so the same core runs
//! against SQLite, in-memory stores or test doubles.

pub mod bind;
pub mod checksum;
pub mod config;
pub mod diff;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use bind::{export_zone, parse_zone};
pub use checksum::zone_checksum;
pub use config::{ValidationOptions, ZoneDefaults, ZoneManagerConfig};
pub use diff::{apply_diff, diff_zone, observed_from_zone, RecordKey, RecordUpdate, ZoneDiff};
pub use error::{CoreError, CoreResult, ParseError, ParseErrorKind, ValidationError};
pub use services::{ServiceContext, SyncService, ZoneService};
pub use traits::{InMemoryZoneRepository, ProviderGateway, ZoneRepository};
pub use types::{
    DnsRecord, NewRecord, ObservedRecord, ObservedRecords, ProviderType, RecordId, RecordType,
    SyncSummary, Zone, ZoneId, ZoneSummary,
};
pub use validation::{validate_record, validate_zone, validate_zone_with};
