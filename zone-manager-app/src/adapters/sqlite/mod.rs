//! SQLite-based zone store using `SeaORM`.
//!
//! `SqliteStore` implements `ZoneRepository` over two tables: `zones` and
//! `records`, the latter keyed to its zone with a cascading foreign key.

pub(crate) mod entity;
mod migration;
mod zone_repo;

use std::path::Path;

use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use zone_manager_core::error::{CoreError, CoreResult};

use migration::Migrator;

/// SQLite-based zone store for the CLI.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (or create) a `SQLite` store and bring its schema up to date.
    ///
    /// - `db_path`: Path to the `SQLite` database file (created if not exists).
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        let store = Self { db };

        Migrator::up(&store.db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        log::debug!("Opened zone store at {}", db_path.display());
        Ok(store)
    }
}

/// Wrap a database error with the action that failed.
pub(crate) fn db_error(action: &str, e: &DbErr) -> CoreError {
    CoreError::StorageError(format!("Failed to {action}: {e}"))
}
