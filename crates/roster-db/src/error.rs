//! Database error types for roster-db.

use thiserror::Error;

use roster_core::errors::RosterError;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DbError {
    /// Collapse a store fault into the domain error kind the projection
    /// paths log and count. Every store-side failure during projection is
    /// treated as the store being unavailable for that row.
    pub(crate) fn into_projection(self) -> RosterError {
        RosterError::StoreUnavailable(self.to_string())
    }
}
