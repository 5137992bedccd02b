//! Identity-creation event payload and the enumeration seam for the
//! external authentication subsystem.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::IdentitySourceError;

/// An identity created by the external authentication subsystem.
///
/// Delivered to the projection writer as the creation-hook payload and
/// enumerated in bulk by the reconciliation scanner. Contains only data
/// fields, no auth logic. `metadata` is the free-form bag the identity was
/// signed up with; recognized keys are `full_name`, `role`, and `org_id`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewIdentity {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// `None` until the identity confirms its email.
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl NewIdentity {
    /// Read a string value from the metadata bag.
    ///
    /// Returns `None` when the key is absent, not a string, or the bag is
    /// not an object at all.
    #[must_use]
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(serde_json::Value::as_str)
    }
}

/// Enumeration interface of the external identity source.
///
/// The projection writer does not need this: it is handed each identity by
/// the creation hook. The reconciliation scanner uses it to find identities
/// the hook missed.
pub trait IdentitySource {
    /// List every identity known to the source.
    fn list_all(
        &self,
    ) -> impl Future<Output = Result<Vec<NewIdentity>, IdentitySourceError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn metadata_str_reads_string_values() {
        let identity = NewIdentity {
            id: "u1".into(),
            email: "a@x.com".into(),
            metadata: serde_json::json!({"full_name": "Ada", "graduation_year": 2019}),
            confirmed_at: None,
        };
        assert_eq!(identity.metadata_str("full_name"), Some("Ada"));
        assert_eq!(identity.metadata_str("graduation_year"), None);
        assert_eq!(identity.metadata_str("missing"), None);
    }

    #[test]
    fn metadata_str_tolerates_non_object_bag() {
        let identity = NewIdentity {
            id: "u1".into(),
            email: "a@x.com".into(),
            metadata: serde_json::Value::Null,
            confirmed_at: None,
        };
        assert_eq!(identity.metadata_str("role"), None);
    }
}
