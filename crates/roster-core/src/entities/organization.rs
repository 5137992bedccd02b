use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An organization a profile may belong to.
///
/// Referenced, not owned, by profiles. Roster only needs it as the target
/// for reference resolution and the `approved` flag admin tooling reads.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}
