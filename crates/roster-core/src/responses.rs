//! Structured results returned to administrative tooling as JSON.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of one reconciliation scan.
///
/// A scan always completes and reports, even under partial failure;
/// per-identity problems show up in `errors`, never as a fault.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReconcileReport {
    pub identities_scanned: u64,
    pub profiles_created: u64,
    pub errors: u64,
}
