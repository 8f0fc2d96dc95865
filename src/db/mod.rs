//! Database module
//!
//! Handles SQLite connection and migrations.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};

/// Open a migrated in-memory database for tests.
#[cfg(test)]
pub(crate) fn open_test_database() -> Database {
    let db = Database::in_memory().expect("in-memory database");
    db.with_conn(|conn| migrations::run_migrations(conn))
        .expect("migrations");
    db
}
