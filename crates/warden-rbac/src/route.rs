//! Route permission requirements and the static path table.
//!
//! # Purpose
//! Each guarded route declares at most one feature (and optionally one
//! sub-feature) an actor must hold, plus an admin-only flag for routes
//! reserved for the administrator role. The table below maps the well-known
//! application paths to their requirements; paths not listed carry no
//! requirement and are always allowed.
use serde::{Deserialize, Serialize};

/// What a route demands of the current actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequirement {
    pub feature: Option<String>,
    pub sub_feature: Option<String>,
    #[serde(default)]
    pub admin_only: bool,
}

impl RouteRequirement {
    /// No requirement; always allowed.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn feature(key: &str) -> Self {
        Self {
            feature: Some(key.to_string()),
            ..Self::default()
        }
    }

    pub fn sub_feature(key: &str, sub_key: &str) -> Self {
        Self {
            feature: Some(key.to_string()),
            sub_feature: Some(sub_key.to_string()),
            ..Self::default()
        }
    }

    pub fn admin_only() -> Self {
        Self {
            admin_only: true,
            ..Self::default()
        }
    }

    /// Human-readable name of the required capability, for 403 views.
    pub fn describe(&self) -> String {
        if self.admin_only {
            return "admin access".to_string();
        }
        match (&self.feature, &self.sub_feature) {
            (Some(feature), Some(sub)) => format!("{feature}/{sub}"),
            (Some(feature), None) => feature.clone(),
            (None, _) => "none".to_string(),
        }
    }
}

/// Path to requirement entries, exact-match on the path.
const ROUTE_PERMISSIONS: &[(&str, &str, Option<&str>)] = &[
    ("/", "home", None),
    ("/dashboard", "home", Some("dashboard")),
    ("/settings", "settings", None),
    ("/settings/profile", "settings", Some("profile")),
    ("/settings/rbac", "admin", Some("roles")),
    ("/admin", "admin", None),
    ("/admin/users", "admin", Some("users")),
    ("/users", "users", Some("all-users")),
    ("/users/add", "users", Some("add-user")),
    ("/analytics", "visualize", Some("analytics")),
    ("/reports", "visualize", Some("reports")),
    ("/config", "config", None),
    ("/discover", "discover", None),
    ("/chat", "conversational", Some("chat")),
];

/// Requirement for navigating to `path`. Unlisted paths require nothing.
pub fn requirement_for_path(path: &str) -> RouteRequirement {
    ROUTE_PERMISSIONS
        .iter()
        .find(|(route, _, _)| *route == path)
        .map(|(_, feature, sub)| match sub {
            Some(sub) => RouteRequirement::sub_feature(feature, sub),
            None => RouteRequirement::feature(feature),
        })
        .unwrap_or_default()
}
