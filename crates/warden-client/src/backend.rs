//! The store-facing seam the editor session drives.
//!
//! # Purpose
//! The editor does not care whether roles live behind HTTP or in a test
//! fixture; it needs role loads and full-map writes. [`AdminClient`]
//! implements this trait for production, tests implement it in memory.
//!
//! [`AdminClient`]: crate::AdminClient
use crate::client::ClientResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use warden_rbac::PermissionSet;

/// A role as served by the admin plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub name: String,
    pub is_core: bool,
    pub version: u64,
    pub permissions: PermissionSet,
}

#[async_trait]
pub trait RoleBackend: Send + Sync {
    async fn list_roles(&self) -> ClientResult<Vec<RoleRecord>>;
    async fn get_role(&self, name: &str) -> ClientResult<RoleRecord>;
    async fn create_role(&self, name: &str, permissions: PermissionSet)
        -> ClientResult<RoleRecord>;
    /// Full-replace write; `expected_version` opts into stale-write rejection.
    async fn update_role_permissions(
        &self,
        name: &str,
        permissions: PermissionSet,
        expected_version: Option<u64>,
    ) -> ClientResult<RoleRecord>;
    async fn delete_role(&self, name: &str) -> ClientResult<()>;
}
