//! Scoped query gateway: role-filtered reads over the profile store.
//!
//! The actor's effective scope is folded into the SQL predicate, so the
//! query never fetches rows the actor cannot see. Each surviving row is
//! still re-checked against the policy evaluator; the two must agree.

use serde::{Deserialize, Serialize};

use roster_core::entities::Profile;
use roster_core::enums::{Action, Role};
use roster_core::policy::{Actor, Scope, authorize, scope_for};

use crate::error::DbError;
use crate::repos::profile::row_to_profile;
use crate::service::RosterService;

/// Optional constraints on a profile listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileFilter {
    pub role: Option<Role>,
    pub verified: Option<bool>,
    /// Maximum rows returned; the configured default applies when absent.
    pub limit: Option<u32>,
}

/// Build the scope SQL clause for an actor.
///
/// - global scope adds nothing
/// - organization scope pins `org_id`
/// - self-only scope pins `id` to the actor's own identity
fn scope_filter_sql(actor: &Actor, scope: &Scope, start_param: u32) -> (String, Vec<libsql::Value>) {
    match scope {
        Scope::Global => (String::new(), vec![]),
        Scope::Organization(org) => (
            format!("AND org_id = ?{start_param}"),
            vec![org.as_str().into()],
        ),
        Scope::SelfOnly => match actor.user_id() {
            Some(id) => (format!("AND id = ?{start_param}"), vec![id.into()]),
            // A scope without an identity matches nothing.
            None => ("AND 1 = 0".to_string(), vec![]),
        },
    }
}

impl RosterService {
    /// List the profiles visible to `actor`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query or row decoding fails. Store faults
    /// propagate; the gateway has no failure-isolation responsibility.
    pub async fn list_profiles(
        &self,
        actor: &Actor,
        filter: &ProfileFilter,
    ) -> Result<Vec<Profile>, DbError> {
        let scope = scope_for(actor);

        let mut predicate = String::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx: u32 = 1;

        if let Some(role) = filter.role {
            predicate.push_str(&format!(" AND role = ?{idx}"));
            params.push(role.as_str().into());
            idx += 1;
        }
        if let Some(verified) = filter.verified {
            predicate.push_str(&format!(" AND verified = ?{idx}"));
            params.push(i64::from(verified).into());
            idx += 1;
        }

        let (scope_sql, scope_params) = scope_filter_sql(actor, &scope, idx);
        if !scope_params.is_empty() {
            idx += 1;
        }
        params.extend(scope_params);

        let limit = filter.limit.unwrap_or(self.default_limit());
        let sql = format!(
            "SELECT id, email, display_name, role, org_id, verified, created_at
             FROM profiles
             WHERE 1=1{predicate} {scope_sql}
             ORDER BY created_at DESC, id DESC
             LIMIT ?{idx}"
        );
        params.push(i64::from(limit).into());

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut profiles = Vec::new();
        while let Some(row) = rows.next().await? {
            let profile = row_to_profile(&row)?;
            // Scope computation and policy evaluation must agree; a row the
            // policy denies indicates a bug in one of them, so drop it
            // rather than leak it.
            if authorize(actor, Action::Read, &profile).is_allow() {
                profiles.push(profile);
            } else {
                tracing::error!(
                    actor = %actor,
                    profile = %profile.id,
                    "scoped query returned a row the policy denies; dropped"
                );
            }
        }
        Ok(profiles)
    }
}
