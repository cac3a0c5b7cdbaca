//! 类型定义模块

mod record;
mod sync;
mod zone;

pub use record::{DnsRecord, NewRecord, RecordId, RecordType};
pub use sync::{ObservedRecord, ObservedRecords, ProviderType, SyncSummary};
pub use zone::{Zone, ZoneId, ZoneSummary};
