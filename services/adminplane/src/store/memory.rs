//! In-memory implementation of the role store.
//!
//! # Purpose
//! Implements [`RoleStore`] entirely in memory using a `HashMap` guarded by
//! `tokio::sync::RwLock`. It exists for:
//! - local development and tests (no external dependencies)
//! - deployments where durability is not required
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: reads take the read lock, mutations the
//!   write lock, so each operation observes a coherent role set.
//! - **No multi-node coordination**: multiple admin-plane instances each have
//!   independent state.
//!
//! # Metrics
//! The store updates the same gauges/counters as the durable backend so
//! dashboards behave identically across backends.
use super::{validate_permissions, validate_role_name, RoleStore, StoreError, StoreResult};
use crate::model::Role;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use warden_rbac::{Catalog, PermissionSet};

/// In-memory role store.
///
/// Wrapped in `Arc<RwLock<...>>` so the store can be cloned into async
/// request handlers while writes stay serialized.
pub struct InMemoryStore {
    catalog: &'static Catalog,
    roles: Arc<RwLock<HashMap<String, Role>>>,
}

impl InMemoryStore {
    pub fn new(catalog: &'static Catalog) -> Self {
        Self {
            catalog,
            roles: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl RoleStore for InMemoryStore {
    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        Ok(self.roles.read().await.values().cloned().collect())
    }

    async fn get_role(&self, name: &str) -> StoreResult<Role> {
        self.roles
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("role {name}")))
    }

    async fn create_role(&self, name: &str, permissions: PermissionSet) -> StoreResult<Role> {
        validate_role_name(name)?;
        validate_permissions(&permissions, self.catalog)?;
        let mut roles = self.roles.write().await;
        if roles.contains_key(name) {
            return Err(StoreError::AlreadyExists(format!("role {name}")));
        }
        let role = Role::new(name, permissions);
        roles.insert(name.to_string(), role.clone());
        metrics::counter!("warden_role_changes_total", "op" => "created").increment(1);
        metrics::gauge!("warden_roles_total").set(roles.len() as f64);
        Ok(role)
    }

    async fn update_role_permissions(
        &self,
        name: &str,
        permissions: PermissionSet,
        expected_version: Option<u64>,
    ) -> StoreResult<Role> {
        validate_permissions(&permissions, self.catalog)?;
        let mut roles = self.roles.write().await;
        let role = roles
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(format!("role {name}")))?;
        if let Some(expected) = expected_version {
            if expected != role.version {
                return Err(StoreError::Conflict(format!(
                    "role {name} is at version {}, caller expected {expected}",
                    role.version
                )));
            }
        }
        // Full replace: the submitted map is the new truth, omitted features
        // are dropped.
        role.permissions = permissions;
        role.version += 1;
        metrics::counter!("warden_role_changes_total", "op" => "updated").increment(1);
        Ok(role.clone())
    }

    async fn delete_role(&self, name: &str) -> StoreResult<()> {
        let mut roles = self.roles.write().await;
        let role = roles
            .get(name)
            .ok_or_else(|| StoreError::NotFound(format!("role {name}")))?;
        if role.is_core {
            return Err(StoreError::Forbidden(format!(
                "role {name} is a core system role"
            )));
        }
        roles.remove(name);
        metrics::counter!("warden_role_changes_total", "op" => "deleted").increment(1);
        metrics::gauge!("warden_roles_total").set(roles.len() as f64);
        Ok(())
    }

    async fn initialize(&self, seed: Vec<Role>) -> StoreResult<usize> {
        for role in &seed {
            validate_role_name(&role.name)?;
            validate_permissions(&role.permissions, self.catalog)?;
        }
        let mut roles = self.roles.write().await;
        roles.clear();
        let created = seed.len();
        for role in seed {
            roles.insert(role.name.clone(), role);
        }
        metrics::counter!("warden_role_changes_total", "op" => "initialized").increment(1);
        metrics::gauge!("warden_roles_total").set(roles.len() as f64);
        Ok(created)
    }

    async fn role_count(&self) -> StoreResult<u64> {
        Ok(self.roles.read().await.len() as u64)
    }

    async fn health_check(&self) -> StoreResult<()> {
        // In-memory backend is always healthy if the process is running.
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
