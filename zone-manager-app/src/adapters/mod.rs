//! Platform-agnostic storage and provider adapters for non-GUI frontends (CLI).

mod snapshot_gateway;

pub use snapshot_gateway::JsonSnapshotGateway;

#[cfg(feature = "sqlite-store")]
mod sqlite;

#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteStore;
