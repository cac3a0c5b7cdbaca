//! `SeaORM` entities for `SqliteStore`.

pub mod record;
pub mod zone;
