//! Projection writer: turns one identity-creation event into a profile row.
//!
//! [`RosterService::on_identity_created`] is the handler the authentication
//! subsystem registers on its creation hook. It runs synchronously inside
//! whatever transactional boundary that subsystem provides, performs exactly
//! one store round-trip, and never raises an error back to the caller:
//! identity creation and profile projection are independent failure domains,
//! and the reconciliation scanner closes any gap a swallowed failure leaves.

use chrono::Utc;

use roster_core::enums::Action;
use roster_core::errors::RosterError;
use roster_core::identity::NewIdentity;
use roster_core::policy::{Actor, UserContext, authorize};
use roster_core::projection::derive_profile;

use crate::service::RosterService;

impl RosterService {
    /// Handle an identity-creation event.
    ///
    /// Guaranteed not to fail: every error is recovered and logged here, so
    /// the identity creation this rides along with is never blocked or
    /// rolled back. Safe to invoke more than once for the same identity;
    /// the second invocation is a no-op.
    pub async fn on_identity_created(&self, identity: &NewIdentity) {
        let actor = self_actor(identity);
        match self.project_identity(&actor, identity).await {
            Ok(true) => {
                tracing::debug!(identity = %identity.id, "profile projected");
            }
            Ok(false) => {
                // Benign: a profile already exists for this identity.
                let duplicate = RosterError::DuplicateProfile(identity.id.clone());
                tracing::debug!(identity = %identity.id, "{duplicate}");
            }
            Err(err) => {
                tracing::warn!(
                    identity = %identity.id,
                    error = %err,
                    "profile projection failed; identity creation unaffected"
                );
            }
        }
    }

    /// Derive, policy-check, and insert the profile for one identity.
    ///
    /// Shared with the reconciliation scanner, which invokes it as
    /// [`Actor::Service`]; the creation hook invokes it as the identity
    /// itself. Returns whether a row was created.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` when derivation fails, policy denies the
    /// create, or the store call fails.
    pub(crate) async fn project_identity(
        &self,
        actor: &Actor,
        identity: &NewIdentity,
    ) -> Result<bool, RosterError> {
        let candidate = derive_profile(identity, Utc::now())?;

        if identity.metadata_str("org_id").is_some() && candidate.org_id.is_none() {
            tracing::warn!(
                identity = %identity.id,
                "malformed organization reference in identity metadata, storing null"
            );
        }

        if !authorize(actor, Action::Create, &candidate).is_allow() {
            return Err(RosterError::PolicyDenied {
                actor: actor.to_string(),
                action: Action::Create,
            });
        }

        self.insert_profile_if_absent(&candidate)
            .await
            .map_err(crate::error::DbError::into_projection)
    }
}

/// The actor a creation event runs as: the identity whose profile is being
/// projected. Self-access covers the create.
fn self_actor(identity: &NewIdentity) -> Actor {
    Actor::User(UserContext {
        user_id: identity.id.clone(),
        role: roster_core::enums::Role::parse_or_default(identity.metadata_str("role")),
        org_id: identity.metadata_str("org_id").map(str::to_string),
    })
}
