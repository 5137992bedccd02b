//! Policy evaluation: who may create, read, or update a profile row.
//!
//! The evaluator is a disjunction of named rules checked in order with
//! short-circuit on the first match. Rule order does not affect the outcome.
//! It is pure and total: ambiguous input resolves to [`Decision::Deny`],
//! never a panic or an error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::Profile;
use crate::enums::{Action, Decision, Role};

/// An authenticated end-user actor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
    pub role: Role,
    pub org_id: Option<String>,
}

/// The principal a request runs as.
///
/// `Service` is the elevated-privilege credential used by trusted internal
/// callers (the reconciliation scanner, maintenance tooling). It is modeled
/// explicitly rather than implied by which key a caller happens to hold.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Actor {
    User(UserContext),
    Service,
}

impl Actor {
    /// The end-user id, when this actor is one.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::User(ctx) => Some(&ctx.user_id),
            Self::Service => None,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(ctx) => write!(f, "user {}", ctx.user_id),
            Self::Service => f.write_str("service"),
        }
    }
}

/// The subset of profiles an actor is permitted to see.
///
/// Derived from the actor alone so it can be folded into a query predicate;
/// [`authorize`] must agree with it row by row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Only the actor's own row.
    SelfOnly,
    /// All rows within one organization.
    Organization(String),
    /// Every row.
    Global,
}

type Rule = fn(&Actor, Action, &Profile) -> bool;

/// The rule list. Evaluation is a disjunction, so order cannot change the
/// outcome; it only decides which rule short-circuits first.
const RULES: &[Rule] = &[
    self_access,
    elevated_credential,
    super_admin,
    org_admin_same_org,
];

/// An actor may act on its own row. Covers a user creating or reading the
/// profile projected from its own identity.
fn self_access(actor: &Actor, _action: Action, target: &Profile) -> bool {
    actor.user_id() == Some(target.id.as_str())
}

/// Service-level credentials bypass row checks entirely.
fn elevated_credential(actor: &Actor, _action: Action, _target: &Profile) -> bool {
    matches!(actor, Actor::Service)
}

/// Super admins are unrestricted.
fn super_admin(actor: &Actor, _action: Action, _target: &Profile) -> bool {
    matches!(actor, Actor::User(ctx) if ctx.role == Role::SuperAdmin)
}

/// Org admins act within their own organization. Both sides must carry an
/// organization: an admin without one matches nothing, as does a profile
/// without one.
fn org_admin_same_org(actor: &Actor, _action: Action, target: &Profile) -> bool {
    match actor {
        Actor::User(ctx) if ctx.role == Role::OrgAdmin => match (&ctx.org_id, &target.org_id) {
            (Some(a), Some(t)) => a == t,
            _ => false,
        },
        _ => false,
    }
}

/// Decide whether `actor` may perform `action` on `target`.
#[must_use]
pub fn authorize(actor: &Actor, action: Action, target: &Profile) -> Decision {
    for rule in RULES {
        if rule(actor, action, target) {
            return Decision::Allow;
        }
    }
    Decision::Deny
}

/// Compute the actor's effective visibility scope.
///
/// Super admins and service credentials see everything; org admins see their
/// organization. Everyone else sees only their own row, including an org
/// admin with no organization on file.
#[must_use]
pub fn scope_for(actor: &Actor) -> Scope {
    match actor {
        Actor::Service => Scope::Global,
        Actor::User(ctx) => match (ctx.role, &ctx.org_id) {
            (Role::SuperAdmin, _) => Scope::Global,
            (Role::OrgAdmin, Some(org)) => Scope::Organization(org.clone()),
            _ => Scope::SelfOnly,
        },
    }
}
