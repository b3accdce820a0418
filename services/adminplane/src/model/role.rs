//! Role model definitions.
//!
//! # Purpose
//! Defines the role record persisted by the store and served by the HTTP API.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use warden_rbac::PermissionSet;

/// A named bundle of feature and sub-feature permission settings.
///
/// `version` is an opaque concurrency token: it increments on every
/// permissions update and callers may echo it back on writes to detect a
/// concurrent editor (stale writes are rejected with a conflict).
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: String,
    /// Core roles are system-defined and cannot be deleted.
    pub is_core: bool,
    pub version: u64,
    pub permissions: PermissionSet,
}

impl Role {
    /// A freshly created, non-core role at version zero.
    pub fn new(name: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            name: name.into(),
            is_core: false,
            version: 0,
            permissions,
        }
    }
}
