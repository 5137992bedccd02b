//! Pure derivation of a profile candidate from an identity-creation event.
//!
//! Shared by the projection writer (one event at a time) and the
//! reconciliation scanner (bulk), so the two can never drift apart.

use chrono::{DateTime, Utc};

use crate::entities::Profile;
use crate::enums::Role;
use crate::errors::RosterError;
use crate::identity::NewIdentity;

/// Longest accepted organization reference.
const MAX_ORG_REF_LEN: usize = 64;

/// Syntactic check on a claimed organization reference.
///
/// Existence is resolved later, at insert time; this only rejects values
/// that could never name an organization.
#[must_use]
pub fn is_well_formed_org_ref(claimed: &str) -> bool {
    !claimed.is_empty()
        && claimed.len() <= MAX_ORG_REF_LEN
        && claimed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Derive the profile candidate for `identity`.
///
/// Field rules:
/// - role: claimed `role` metadata, defaulting to `alumni` when absent or
///   unrecognized
/// - organization: claimed `org_id` metadata, kept only when well-formed
/// - display name: claimed `full_name` metadata, falling back to the email
/// - verified: whether the identity was already confirmed
///
/// # Errors
///
/// Returns [`RosterError::MalformedIdentity`] when the identity has an empty
/// id or email; such an event cannot be projected at all.
pub fn derive_profile(identity: &NewIdentity, now: DateTime<Utc>) -> Result<Profile, RosterError> {
    if identity.id.is_empty() {
        return Err(RosterError::MalformedIdentity("empty identity id".into()));
    }
    if identity.email.is_empty() {
        return Err(RosterError::MalformedIdentity(format!(
            "identity {} has an empty email",
            identity.id
        )));
    }

    let role = Role::parse_or_default(identity.metadata_str("role"));
    let org_id = identity
        .metadata_str("org_id")
        .filter(|claimed| is_well_formed_org_ref(claimed))
        .map(str::to_string);
    let display_name = identity
        .metadata_str("full_name")
        .filter(|name| !name.is_empty())
        .unwrap_or(&identity.email)
        .to_string();

    Ok(Profile {
        id: identity.id.clone(),
        email: identity.email.clone(),
        display_name,
        role,
        org_id,
        verified: identity.confirmed_at.is_some(),
        created_at: now,
    })
}
