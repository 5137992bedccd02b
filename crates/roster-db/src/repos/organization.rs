//! Organization repository.
//!
//! Organizations are referenced, not owned. This repo exists so profile
//! reference resolution has a target and admin tooling can read the
//! approval flag.

use roster_core::entities::Organization;

use crate::error::DbError;
use crate::helpers::parse_datetime;
use crate::service::RosterService;

impl RosterService {
    /// Insert or update an organization.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the statement fails.
    pub async fn put_organization(&self, org: &Organization) -> Result<(), DbError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO organizations (id, name, approved, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name, approved = excluded.approved",
                libsql::params![
                    org.id.as_str(),
                    org.name.as_str(),
                    i64::from(org.approved),
                    org.created_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(())
    }

    /// Get an organization by id.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query or row decoding fails.
    pub async fn get_organization(&self, id: &str) -> Result<Option<Organization>, DbError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, approved, created_at FROM organizations WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Organization {
                id: row.get::<String>(0)?,
                name: row.get::<String>(1)?,
                approved: row.get::<i64>(2)? != 0,
                created_at: parse_datetime(&row.get::<String>(3)?)?,
            })),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use roster_core::entities::Organization;

    use crate::test_support::helpers::test_service;

    #[tokio::test]
    async fn put_and_get_organization() {
        let svc = test_service().await;

        let org = Organization {
            id: "org-1".into(),
            name: "Acme University".into(),
            approved: false,
            created_at: Utc::now(),
        };
        svc.put_organization(&org).await.unwrap();

        let stored = svc.get_organization("org-1").await.unwrap().unwrap();
        assert_eq!(stored.name, "Acme University");
        assert!(!stored.approved);
    }

    #[tokio::test]
    async fn put_twice_updates_in_place() {
        let svc = test_service().await;

        let mut org = Organization {
            id: "org-1".into(),
            name: "Acme University".into(),
            approved: false,
            created_at: Utc::now(),
        };
        svc.put_organization(&org).await.unwrap();

        org.approved = true;
        svc.put_organization(&org).await.unwrap();

        let stored = svc.get_organization("org-1").await.unwrap().unwrap();
        assert!(stored.approved);
    }

    #[tokio::test]
    async fn get_missing_organization_is_none() {
        let svc = test_service().await;
        assert!(svc.get_organization("org-ghost").await.unwrap().is_none());
    }
}
