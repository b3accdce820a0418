//! Warden RBAC primitives shared by the admin plane and its clients.
//!
//! # Purpose
//! Centralizes the permission model (feature catalog, two-level permission
//! maps, cascade rules), the tri-state permission evaluator, and the
//! navigation guard state machine.
//!
//! # How it fits
//! The admin-plane service validates incoming permission maps against this
//! model before persisting them, while clients use the evaluator and guard to
//! filter navigation and gate views against a loaded permission map.
//!
//! # Key invariants
//! - A disabled feature has every one of its sub-features disabled.
//! - An enabled sub-feature implies its parent feature is enabled.
//! - Unknown roles and empty permission maps deny by default; only an
//!   in-flight or failed load reports `Access::Unknown`.
//!
//! # Examples
//! ```rust
//! use warden_rbac::{Catalog, default_permissions, toggle_sub_feature, is_allowed};
//!
//! let catalog = Catalog::builtin();
//! let mut perms = default_permissions(catalog);
//! toggle_sub_feature(&mut perms, catalog, "home", "dashboard").expect("known keys");
//! assert!(is_allowed(&perms, "home", Some("dashboard")));
//! assert!(is_allowed(&perms, "home", None));
//! ```

mod catalog;
mod errors;
mod evaluate;
mod guard;
mod perms;
mod route;

pub use catalog::{Catalog, FeatureDef, SubFeatureDef};
pub use errors::{RbacError, RbacResult};
pub use evaluate::{Access, Evaluator, PermissionsState};
pub use guard::{decide, is_admin, AuthState, GuardDecision, ADMIN_ROLE};
pub use perms::{
    check_cascade, default_permissions, is_allowed, toggle_feature, toggle_sub_feature,
    FeaturePermission, PermissionSet,
};
pub use route::{requirement_for_path, RouteRequirement};
