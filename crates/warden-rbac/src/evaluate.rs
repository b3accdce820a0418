//! Tri-state permission evaluation over an asynchronously loaded map.
//!
//! # Purpose
//! Consumers fetch a role's permission map over the network, so at any given
//! moment the map is loading, loaded, or failed. Collapsing those states into
//! a bare boolean deep inside a consumer hides the fail-open window, so the
//! evaluator answers with [`Access`] instead: `Allowed`, `Denied`, or
//! `Unknown` while no trustworthy map is available.
//!
//! Callers choose the collapse policy. The navigation guard treats `Unknown`
//! during a load as "still loading" and `Unknown` after a failure as allowed,
//! mirroring the admin UI it was extracted from; stricter callers can deny on
//! `Unknown`. Leniency is expected to be time-bounded by the caller: once a
//! load settles (or a retry gives up), the evaluator holds a `Ready` map and
//! every answer is a real allow/deny.
use crate::perms::{is_allowed, PermissionSet};
use crate::route::RouteRequirement;

/// Outcome of a permission query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
    /// No trustworthy permission map is available (load in flight or failed).
    Unknown,
}

impl Access {
    /// Collapse for callers that fail open during the unknown window.
    pub fn permits_lenient(self) -> bool {
        !matches!(self, Access::Denied)
    }

    /// Collapse for callers that refuse to act without a loaded map.
    pub fn permits_strict(self) -> bool {
        matches!(self, Access::Allowed)
    }
}

/// Lifecycle of one consumer's permission-map fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionsState {
    /// Fetch in flight; no map yet.
    Loading,
    /// Map loaded and authoritative for this consumer's lifecycle.
    Ready(PermissionSet),
    /// Fetch failed; the caller decides how long to stay lenient.
    Failed,
}

/// Answers access queries for one role against its loaded permission map.
#[derive(Debug, Clone)]
pub struct Evaluator {
    state: PermissionsState,
}

impl Evaluator {
    pub fn new(state: PermissionsState) -> Self {
        Self { state }
    }

    pub fn loading() -> Self {
        Self::new(PermissionsState::Loading)
    }

    pub fn ready(perms: PermissionSet) -> Self {
        Self::new(PermissionsState::Ready(perms))
    }

    pub fn failed() -> Self {
        Self::new(PermissionsState::Failed)
    }

    pub fn state(&self) -> &PermissionsState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PermissionsState::Loading)
    }

    /// Can the role behind this evaluator use `feature_key` (and optionally
    /// `sub_key`)?
    ///
    /// Default-deny: an empty loaded map denies everything. Only the load
    /// window itself reports `Unknown`.
    pub fn has_permission(&self, feature_key: &str, sub_key: Option<&str>) -> Access {
        match &self.state {
            PermissionsState::Loading | PermissionsState::Failed => Access::Unknown,
            PermissionsState::Ready(perms) => {
                if perms.is_empty() {
                    return Access::Denied;
                }
                if is_allowed(perms, feature_key, sub_key) {
                    Access::Allowed
                } else {
                    Access::Denied
                }
            }
        }
    }

    /// Evaluate a route requirement. An empty requirement always allows.
    pub fn can_access(&self, requirement: &RouteRequirement) -> Access {
        match &requirement.feature {
            None => Access::Allowed,
            Some(feature) => self.has_permission(feature, requirement.sub_feature.as_deref()),
        }
    }
}
