//! Navigation guard state machine.
//!
//! # Purpose
//! One pure decision per navigation attempt. The guard never mutates
//! permission state and never fails; every input resolves to exactly one of
//! the four decisions below, which the caller renders (spinner, login
//! redirect, 403 view, or the guarded content).
use crate::evaluate::{Access, Evaluator};
use crate::route::RouteRequirement;

/// Role name granted unconditional access to admin-only routes.
pub const ADMIN_ROLE: &str = "ADMIN";

/// The actor's authentication status as reported by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Authentication check still in flight.
    Unresolved,
    /// Definitely not signed in.
    Anonymous,
    /// Signed in with the given role.
    Authenticated { role: String },
}

/// Terminal outcome for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth or the permission map is still resolving; render nothing actionable.
    Loading,
    /// Not signed in; send the actor to login.
    RedirectLogin,
    /// Signed in but lacking the named capability.
    Unauthorized {
        required: String,
        actor_role: String,
    },
    /// Render the guarded content.
    Authorized,
}

/// Resolve one navigation attempt.
///
/// Order matters: authentication is settled before authorization, the
/// admin-only gate before feature requirements. An `Unknown` permission
/// answer maps to `Loading` while the fetch is in flight and falls open to
/// `Authorized` after a failed load, so a flaky permission fetch degrades the
/// UI rather than locking the actor out of everything.
pub fn decide(
    auth: &AuthState,
    requirement: &RouteRequirement,
    evaluator: &Evaluator,
) -> GuardDecision {
    let role = match auth {
        AuthState::Unresolved => return GuardDecision::Loading,
        AuthState::Anonymous => return GuardDecision::RedirectLogin,
        AuthState::Authenticated { role } => role,
    };

    if requirement.admin_only && !is_admin(role) {
        return GuardDecision::Unauthorized {
            required: "admin access".to_string(),
            actor_role: role.clone(),
        };
    }

    match evaluator.can_access(requirement) {
        Access::Allowed => GuardDecision::Authorized,
        Access::Denied => GuardDecision::Unauthorized {
            required: requirement.describe(),
            actor_role: role.clone(),
        },
        Access::Unknown => {
            if evaluator.is_loading() {
                GuardDecision::Loading
            } else {
                GuardDecision::Authorized
            }
        }
    }
}

/// Whether `role` is the administrator role.
pub fn is_admin(role: &str) -> bool {
    role.eq_ignore_ascii_case(ADMIN_ROLE)
}
