//! Profile repository: the store contract the projection core writes and
//! reads through.
//!
//! Creation goes exclusively through
//! [`RosterService::insert_profile_if_absent`]: a single conflict-free
//! insert, never an upsert. A race between the
//! projection writer and the reconciliation scanner for the same identity
//! resolves here, with the loser observing `created = false`.

use roster_core::entities::{Profile, ProfilePatch};

use crate::error::DbError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::service::RosterService;

impl RosterService {
    /// Insert a profile unless one already exists for the identity.
    ///
    /// Returns whether a row was created; an existing row makes this a
    /// no-op, not an error. The organization reference is resolved against
    /// the `organizations` table inside the same statement; an unknown
    /// reference stores NULL, keeping the insert a single store round-trip.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the insert fails.
    pub async fn insert_profile_if_absent(&self, profile: &Profile) -> Result<bool, DbError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "INSERT INTO profiles (id, email, display_name, role, org_id, verified, created_at)
                 VALUES (?1, ?2, ?3, ?4, (SELECT id FROM organizations WHERE id = ?5), ?6, ?7)
                 ON CONFLICT(id) DO NOTHING",
                libsql::params![
                    profile.id.as_str(),
                    profile.email.as_str(),
                    profile.display_name.as_str(),
                    profile.role.as_str(),
                    profile.org_id.as_deref(),
                    i64::from(profile.verified),
                    profile.created_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(affected == 1)
    }

    /// Get a profile by identity id.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query or row decoding fails.
    pub async fn get_profile(&self, id: &str) -> Result<Option<Profile>, DbError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, email, display_name, role, org_id, verified, created_at
                 FROM profiles WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_profile(&row)?)),
            None => Ok(None),
        }
    }

    /// Apply a partial update to an existing profile.
    ///
    /// `None` fields are left untouched; this cannot clear an organization
    /// reference. The profile id itself is immutable.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NoResult` if no profile exists for `id`.
    pub async fn update_profile(&self, id: &str, patch: &ProfilePatch) -> Result<(), DbError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE profiles SET
                     display_name = COALESCE(?2, display_name),
                     role = COALESCE(?3, role),
                     org_id = COALESCE(?4, org_id),
                     verified = COALESCE(?5, verified)
                 WHERE id = ?1",
                libsql::params![
                    id,
                    patch.display_name.as_deref(),
                    patch.role.map(|r| r.as_str()),
                    patch.org_id.as_deref(),
                    patch.verified.map(i64::from)
                ],
            )
            .await?;
        if affected == 0 {
            return Err(DbError::NoResult);
        }
        Ok(())
    }

    /// Delete a profile. Only explicit administrative action arrives here;
    /// the projection core never deletes.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NoResult` if no profile exists for `id`.
    pub async fn delete_profile(&self, id: &str) -> Result<(), DbError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM profiles WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DbError::NoResult);
        }
        Ok(())
    }
}

/// Convert a libSQL row to a `Profile` struct.
///
/// Column order: id, email, display_name, role, org_id, verified, created_at.
pub(crate) fn row_to_profile(row: &libsql::Row) -> Result<Profile, DbError> {
    Ok(Profile {
        id: row.get::<String>(0)?,
        email: row.get::<String>(1)?,
        display_name: row.get::<String>(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        org_id: get_opt_string(row, 4)?,
        verified: row.get::<i64>(5)? != 0,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}
