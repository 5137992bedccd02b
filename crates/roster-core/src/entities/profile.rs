use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// The application-owned projection of an identity.
///
/// `id` equals the owning identity's id: the join key and the uniqueness
/// constraint. A profile is created at most once, by the
/// projection writer or retroactively by the reconciliation scanner.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub org_id: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied to an existing profile.
///
/// `None` fields are left untouched. Used by collaborators outside the
/// projection core (verification flows, admin edits); the core itself never
/// mutates a profile after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub role: Option<Role>,
    pub org_id: Option<String>,
    pub verified: Option<bool>,
}
