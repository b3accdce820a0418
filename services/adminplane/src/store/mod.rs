use crate::model::Role;
use async_trait::async_trait;
use thiserror::Error;
use warden_rbac::{check_cascade, Catalog, PermissionSet};

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unexpected(err.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD over role entities, backed by durable storage.
///
/// Every mutating operation is durable immediately; there is no write-behind
/// and no transaction spanning multiple roles. Update semantics are full
/// replace: callers submit the complete permission map and omitted features
/// are dropped. When `expected_version` is supplied on update, a mismatch
/// against the stored version fails with [`StoreError::Conflict`] and leaves
/// the role untouched.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn list_roles(&self) -> StoreResult<Vec<Role>>;
    async fn get_role(&self, name: &str) -> StoreResult<Role>;
    async fn create_role(&self, name: &str, permissions: PermissionSet) -> StoreResult<Role>;
    async fn update_role_permissions(
        &self,
        name: &str,
        permissions: PermissionSet,
        expected_version: Option<u64>,
    ) -> StoreResult<Role>;
    async fn delete_role(&self, name: &str) -> StoreResult<()>;
    /// Destructively replace all roles with `seed`; first-run bootstrap only.
    async fn initialize(&self, seed: Vec<Role>) -> StoreResult<usize>;
    async fn role_count(&self) -> StoreResult<u64>;

    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}

/// Reject blank role names before any storage work.
pub fn validate_role_name(name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation("role name is required".to_string()));
    }
    Ok(())
}

/// Write-path defense: reject permission maps that reference keys outside
/// the catalog or violate the cascade invariant. Editors apply the cascade
/// on every mutation, so a violation here means a buggy or bypassing caller.
pub fn validate_permissions(permissions: &PermissionSet, catalog: &Catalog) -> StoreResult<()> {
    check_cascade(permissions, catalog)
        .map_err(|err| StoreError::Validation(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use warden_rbac::FeaturePermission;

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(
            validate_role_name("   "),
            Err(StoreError::Validation(_))
        ));
        validate_role_name("Marketing").expect("valid name");
    }

    #[test]
    fn invalid_maps_are_rejected() {
        let catalog = Catalog::builtin();
        let mut perms = PermissionSet::new();
        perms.insert(
            "admin".to_string(),
            FeaturePermission {
                enabled: false,
                sub_features: BTreeMap::from([("logs".to_string(), true)]),
            },
        );
        assert!(matches!(
            validate_permissions(&perms, catalog),
            Err(StoreError::Validation(_))
        ));
    }
}
