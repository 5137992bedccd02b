//! Reconciliation scanner: batch repair of identities without a profile.
//!
//! Walks every identity known to the external source and applies the same
//! derivation and conflict-free insert as the projection writer. Losing a
//! race with a live writer is `created = false`, not an error, so the scan
//! is safe to run concurrently with identity creation and with itself.
//! Cancellation mid-scan leaves identities unreconciled for the next run,
//! never a partially-written row.

use roster_core::identity::{IdentitySource, NewIdentity};
use roster_core::policy::Actor;
use roster_core::responses::ReconcileReport;

use crate::service::RosterService;

impl RosterService {
    /// Scan all identities and create the profiles that are missing.
    ///
    /// Runs as the elevated [`Actor::Service`] credential. Per-identity
    /// failures increment `errors` and the scan continues; a failed
    /// enumeration reports one error with nothing scanned. The call itself
    /// never fails, and re-running it is the retry mechanism: a second run
    /// with no new identities reports `profiles_created = 0`.
    pub async fn reconcile<S: IdentitySource + Sync>(&self, source: &S) -> ReconcileReport {
        let identities: Vec<NewIdentity> = match source.list_all().await {
            Ok(identities) => identities,
            Err(err) => {
                tracing::warn!(error = %err, "reconcile: identity enumeration failed");
                return ReconcileReport {
                    identities_scanned: 0,
                    profiles_created: 0,
                    errors: 1,
                };
            }
        };

        let mut report = ReconcileReport {
            identities_scanned: identities.len() as u64,
            ..ReconcileReport::default()
        };

        for identity in &identities {
            match self.project_identity(&Actor::Service, identity).await {
                Ok(true) => report.profiles_created += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(
                        identity = %identity.id,
                        error = %err,
                        "reconcile: identity skipped"
                    );
                    report.errors += 1;
                }
            }
        }

        tracing::info!(
            scanned = report.identities_scanned,
            created = report.profiles_created,
            errors = report.errors,
            "reconcile finished"
        );
        report
    }
}
