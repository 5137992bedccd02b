//! Cross-cutting error types for Roster.
//!
//! Store-level errors (`DbError`) live in `roster-db`. The variants here are
//! the failure kinds the projection core distinguishes when recovering or
//! counting errors.

use thiserror::Error;

use crate::enums::Action;

/// Failure kinds arising from projection and policy evaluation.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The backing store was unreachable (transient).
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Identity metadata failed validation and cannot be projected.
    #[error("malformed identity: {0}")]
    MalformedIdentity(String),

    /// The policy evaluator refused the action. Not a fault.
    #[error("policy denied {action} for actor {actor}")]
    PolicyDenied { actor: String, action: Action },

    /// A profile already exists for this identity. Benign; callers treat
    /// this as success and never surface it.
    #[error("profile already exists for identity {0}")]
    DuplicateProfile(String),
}

/// Errors raised while enumerating identities from the external source.
#[derive(Debug, Error)]
pub enum IdentitySourceError {
    /// The identity source was unreachable.
    #[error("identity source unavailable: {0}")]
    Unavailable(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
