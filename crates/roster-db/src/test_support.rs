//! Shared test utilities for roster-db tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::Utc;

    use roster_core::entities::Organization;
    use roster_core::errors::IdentitySourceError;
    use roster_core::identity::{IdentitySource, NewIdentity};

    use crate::RosterDb;
    use crate::service::RosterService;

    /// Create an in-memory service (for pure store tests).
    pub async fn test_service() -> RosterService {
        let db = RosterDb::open_local(":memory:").await.unwrap();
        RosterService::from_db(db, 20)
    }

    /// Seed an approved organization so reference resolution has a target.
    pub async fn seed_org(svc: &RosterService, id: &str, name: &str) {
        svc.put_organization(&Organization {
            id: id.to_string(),
            name: name.to_string(),
            approved: true,
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    }

    /// Build an unconfirmed identity-creation event.
    pub fn identity(id: &str, email: &str, metadata: serde_json::Value) -> NewIdentity {
        NewIdentity {
            id: id.to_string(),
            email: email.to_string(),
            metadata,
            confirmed_at: None,
        }
    }

    /// Identity source backed by a fixed list.
    pub struct StaticSource(pub Vec<NewIdentity>);

    impl IdentitySource for StaticSource {
        async fn list_all(&self) -> Result<Vec<NewIdentity>, IdentitySourceError> {
            Ok(self.0.clone())
        }
    }

    /// Identity source that is always unreachable.
    pub struct FailingSource;

    impl IdentitySource for FailingSource {
        async fn list_all(&self) -> Result<Vec<NewIdentity>, IdentitySourceError> {
            Err(IdentitySourceError::Unavailable("source offline".into()))
        }
    }
}
