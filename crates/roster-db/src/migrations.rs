//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent
//! re-running.

use crate::RosterDb;
use crate::error::DbError;

/// Initial schema: organizations + profiles, 3 indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl RosterDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DbError> {
        self.conn()
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DbError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
