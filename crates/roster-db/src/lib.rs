//! # roster-db
//!
//! libSQL database operations for Roster.
//!
//! Hosts the profile store (insert-if-absent, lookup, patch, delete), the
//! projection writer fed by identity-creation events, the reconciliation
//! scanner that repairs identities the writer missed, and the scoped query
//! gateway administrative dashboards read through.
//!
//! Uses the `libsql` crate (C `SQLite` fork) — local files in production,
//! `:memory:` in tests. The store is the sole synchronization point: writer
//! and scanner racing on the same identity resolve through the store's
//! conflict-free insert, never application-level locking.

pub mod error;
pub mod gateway;
pub mod helpers;
mod migrations;
pub mod projection;
pub mod reconcile;
pub mod repos;
pub mod service;

mod test_support;

use error::DbError;
use libsql::Builder;

/// Central database handle for Roster state operations.
///
/// Wraps a libSQL database and connection; repository methods live on
/// [`service::RosterService`].
pub struct RosterDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl RosterDb {
    /// Open a local database at the given path (`:memory:` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DbError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DbError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let roster_db = Self { db, conn };
        roster_db.run_migrations().await?;
        Ok(roster_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
