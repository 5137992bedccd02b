//! End-to-end flow: identity creation hook → reconciliation repair →
//! role-scoped administrative listing.

use chrono::Utc;
use pretty_assertions::assert_eq;

use roster_core::entities::{Organization, ProfilePatch};
use roster_core::enums::Role;
use roster_core::errors::IdentitySourceError;
use roster_core::identity::{IdentitySource, NewIdentity};
use roster_core::policy::{Actor, UserContext};
use roster_db::gateway::ProfileFilter;
use roster_db::service::RosterService;

struct AuthDirectory(Vec<NewIdentity>);

impl IdentitySource for AuthDirectory {
    async fn list_all(&self) -> Result<Vec<NewIdentity>, IdentitySourceError> {
        Ok(self.0.clone())
    }
}

fn signup(id: &str, email: &str, role: &str, org: &str) -> NewIdentity {
    NewIdentity {
        id: id.to_string(),
        email: email.to_string(),
        metadata: serde_json::json!({"role": role, "org_id": org}),
        confirmed_at: None,
    }
}

async fn service_with_orgs() -> RosterService {
    let svc = RosterService::new_local(":memory:").await.unwrap();
    for (id, name) in [("org-1", "Acme University"), ("org-2", "Globex College")] {
        svc.put_organization(&Organization {
            id: id.to_string(),
            name: name.to_string(),
            approved: true,
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    }
    svc
}

#[tokio::test]
async fn signup_repair_and_scoped_review() {
    let svc = service_with_orgs().await;

    let directory = AuthDirectory(vec![
        signup("u1", "u1@acme.edu", "student", "org-1"),
        signup("u2", "u2@acme.edu", "alumni", "org-1"),
        signup("u3", "u3@globex.edu", "alumni", "org-2"),
        signup("adm", "adm@acme.edu", "org_admin", "org-1"),
    ]);

    // Only the first signup reached the creation hook; the projection for
    // the others failed silently (the gap reconciliation exists to close).
    svc.on_identity_created(&directory.0[0]).await;

    let report = svc.reconcile(&directory).await;
    assert_eq!(report.identities_scanned, 4);
    assert_eq!(report.profiles_created, 3);
    assert_eq!(report.errors, 0);

    // The org-1 admin reviews their organization: org-2 rows are invisible.
    let admin = Actor::User(UserContext {
        user_id: "adm".to_string(),
        role: Role::OrgAdmin,
        org_id: Some("org-1".to_string()),
    });
    let visible = svc.list_profiles(&admin, &ProfileFilter::default()).await.unwrap();
    let mut seen: Vec<&str> = visible.iter().map(|p| p.id.as_str()).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec!["adm", "u1", "u2"]);

    // A global admin sees everything, newest signups first.
    let root = Actor::User(UserContext {
        user_id: "root".to_string(),
        role: Role::SuperAdmin,
        org_id: None,
    });
    let all = svc.list_profiles(&root, &ProfileFilter::default()).await.unwrap();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn verification_flow_rides_on_update() {
    let svc = service_with_orgs().await;

    let event = signup("u1", "u1@acme.edu", "student", "org-1");
    svc.on_identity_created(&event).await;

    let fresh = svc.get_profile("u1").await.unwrap().unwrap();
    assert!(!fresh.verified, "unconfirmed signup starts unverified");

    // Admin approval arrives from outside the projection core.
    svc.update_profile(
        "u1",
        &ProfilePatch {
            verified: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let root = Actor::User(UserContext {
        user_id: "root".to_string(),
        role: Role::SuperAdmin,
        org_id: None,
    });
    let verified = svc
        .list_profiles(
            &root,
            &ProfileFilter {
                verified: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].id, "u1");
}

#[tokio::test]
async fn hook_and_reconcile_for_same_identity_yield_one_row() {
    let svc = service_with_orgs().await;

    let event = signup("u1", "u1@acme.edu", "student", "org-1");
    let directory = AuthDirectory(vec![event.clone()]);

    // Hook fires, then a scheduled reconcile walks the same identity.
    svc.on_identity_created(&event).await;
    let report = svc.reconcile(&directory).await;
    assert_eq!(report.profiles_created, 0);
    assert_eq!(report.errors, 0);

    let mut rows = svc
        .db()
        .conn()
        .query("SELECT COUNT(*) FROM profiles", ())
        .await
        .unwrap();
    let row = rows.next().await.unwrap().unwrap();
    assert_eq!(row.get::<i64>(0).unwrap(), 1);
}
