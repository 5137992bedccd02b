//! Service layer owning the database handle.
//!
//! `RosterService` wraps [`RosterDb`] and carries the configured defaults the
//! query gateway needs. All repository, projection, reconciliation, and
//! gateway methods are implemented as `impl RosterService` blocks in their
//! own modules.

use roster_config::RosterConfig;

use crate::RosterDb;
use crate::error::DbError;

/// Orchestrates profile store operations over a single database handle.
pub struct RosterService {
    db: RosterDb,
    default_limit: u32,
}

impl RosterService {
    /// Create a new service wrapping a local database.
    ///
    /// Uses the built-in default listing limit; [`Self::from_config`] wires
    /// the configured one.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DbError> {
        let db = RosterDb::open_local(db_path).await?;
        Ok(Self {
            db,
            default_limit: roster_config::GeneralConfig::default().default_limit,
        })
    }

    /// Create a service from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database at `config.database.path` cannot be
    /// opened.
    pub async fn from_config(config: &RosterConfig) -> Result<Self, DbError> {
        let db = RosterDb::open_local(&config.database.path).await?;
        Ok(Self {
            db,
            default_limit: config.general.default_limit,
        })
    }

    /// Create from an existing `RosterDb` (for testing).
    #[must_use]
    pub const fn from_db(db: RosterDb, default_limit: u32) -> Self {
        Self { db, default_limit }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RosterDb {
        &self.db
    }

    /// The listing limit applied when a filter does not name one.
    #[must_use]
    pub const fn default_limit(&self) -> u32 {
        self.default_limit
    }
}
