//! Role-editor session state machine.
//!
//! # Purpose
//! Backs the role-editing screen: an administrator selects a role, toggles
//! feature and sub-feature switches against a local working copy, and commits
//! with an explicit save. Until save, nothing leaves the session; selecting
//! another role discards unsaved edits; a failed save leaves the working copy
//! and dirty flag exactly as they were so the administrator can retry.
//!
//! # Key invariants
//! - Toggles go through the cascade-preserving model operations, so the
//!   working copy is always coherent and the store's write-path validation
//!   never fires for edits made here.
//! - `dirty` is derived state: true iff the working copy differs from the
//!   baseline loaded at selection time or re-baselined by the last save.
//! - Saves send the complete working map together with the version loaded at
//!   selection, so a concurrent editor's save surfaces as a conflict instead
//!   of being silently overwritten.
use crate::backend::RoleBackend;
use crate::client::ClientError;
use thiserror::Error;
use warden_rbac::{
    default_permissions, toggle_feature, toggle_sub_feature, Catalog, PermissionSet, RbacError,
};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no role selected")]
    NoSelection,
    #[error("role name is required")]
    BlankName,
    #[error("role {0} already exists")]
    DuplicateName(String),
    #[error(transparent)]
    Rbac(#[from] RbacError),
    #[error(transparent)]
    Backend(#[from] ClientError),
}

#[derive(Debug, Clone)]
struct Selection {
    name: String,
    baseline: PermissionSet,
    working: PermissionSet,
    version: u64,
}

/// One administrator's editing session against the role store.
pub struct EditorSession<B: RoleBackend> {
    backend: B,
    catalog: &'static Catalog,
    selection: Option<Selection>,
}

impl<B: RoleBackend> EditorSession<B> {
    pub fn new(backend: B, catalog: &'static Catalog) -> Self {
        Self {
            backend,
            catalog,
            selection: None,
        }
    }

    pub fn selected_role(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.name.as_str())
    }

    pub fn working_permissions(&self) -> Option<&PermissionSet> {
        self.selection.as_ref().map(|s| &s.working)
    }

    /// True iff the working copy differs from the last-saved state.
    pub fn is_dirty(&self) -> bool {
        self.selection
            .as_ref()
            .map(|s| s.working != s.baseline)
            .unwrap_or(false)
    }

    /// Load `name` into the working copy, discarding any unsaved changes to
    /// the previous selection.
    pub async fn select_role(&mut self, name: &str) -> Result<(), EditorError> {
        let record = self.backend.get_role(name).await?;
        self.selection = Some(Selection {
            name: record.name,
            baseline: record.permissions.clone(),
            working: record.permissions,
            version: record.version,
        });
        Ok(())
    }

    /// Flip a feature switch on the working copy; returns the new value.
    pub fn toggle_feature(&mut self, feature_key: &str) -> Result<bool, EditorError> {
        let selection = self.selection.as_mut().ok_or(EditorError::NoSelection)?;
        Ok(toggle_feature(
            &mut selection.working,
            self.catalog,
            feature_key,
        )?)
    }

    /// Flip a sub-feature switch on the working copy; returns the new value.
    pub fn toggle_sub_feature(
        &mut self,
        feature_key: &str,
        sub_key: &str,
    ) -> Result<bool, EditorError> {
        let selection = self.selection.as_mut().ok_or(EditorError::NoSelection)?;
        Ok(toggle_sub_feature(
            &mut selection.working,
            self.catalog,
            feature_key,
            sub_key,
        )?)
    }

    /// Revert the working copy to the last-saved state.
    pub fn discard(&mut self) -> Result<(), EditorError> {
        let selection = self.selection.as_mut().ok_or(EditorError::NoSelection)?;
        selection.working = selection.baseline.clone();
        Ok(())
    }

    /// Persist the working copy through the store.
    ///
    /// On success the save re-baselines the session. On failure the working
    /// copy and dirty flag are untouched; the error is the caller's to show.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let (name, working, version) = match &self.selection {
            Some(s) => (s.name.clone(), s.working.clone(), s.version),
            None => return Err(EditorError::NoSelection),
        };
        let record = self
            .backend
            .update_role_permissions(&name, working, Some(version))
            .await?;
        if let Some(selection) = self.selection.as_mut() {
            selection.baseline = record.permissions.clone();
            selection.working = record.permissions;
            selection.version = record.version;
        }
        Ok(())
    }

    /// Create a role with the all-disabled default map, then select it.
    ///
    /// Name validation happens before any backend call: blank names and
    /// case-sensitive duplicates are rejected locally.
    pub async fn create_role(&mut self, name: &str) -> Result<(), EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::BlankName);
        }
        let existing = self.backend.list_roles().await?;
        if existing.iter().any(|role| role.name == name) {
            return Err(EditorError::DuplicateName(name.to_string()));
        }
        let record = self
            .backend
            .create_role(name, default_permissions(self.catalog))
            .await?;
        self.selection = Some(Selection {
            name: record.name,
            baseline: record.permissions.clone(),
            working: record.permissions,
            version: record.version,
        });
        Ok(())
    }

    /// Delete a role; the store enforces core-role protection. A successful
    /// delete of the selected role clears the selection.
    pub async fn delete_role(&mut self, name: &str) -> Result<(), EditorError> {
        self.backend.delete_role(name).await?;
        if self.selected_role() == Some(name) {
            self.selection = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RoleRecord;
    use crate::client::ClientResult;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use warden_rbac::is_allowed;

    /// In-memory backend with the same version semantics as the admin plane.
    struct MockBackend {
        roles: Mutex<HashMap<String, RoleRecord>>,
        fail_next_update: AtomicBool,
    }

    impl MockBackend {
        fn new(seed: Vec<RoleRecord>) -> Self {
            Self {
                roles: Mutex::new(
                    seed.into_iter()
                        .map(|role| (role.name.clone(), role))
                        .collect(),
                ),
                fail_next_update: AtomicBool::new(false),
            }
        }

        fn stored(&self, name: &str) -> Option<RoleRecord> {
            self.roles.lock().unwrap().get(name).cloned()
        }

        fn bump_version(&self, name: &str) {
            let mut roles = self.roles.lock().unwrap();
            roles.get_mut(name).unwrap().version += 1;
        }
    }

    #[async_trait]
    impl RoleBackend for MockBackend {
        async fn list_roles(&self) -> ClientResult<Vec<RoleRecord>> {
            Ok(self.roles.lock().unwrap().values().cloned().collect())
        }

        async fn get_role(&self, name: &str) -> ClientResult<RoleRecord> {
            self.stored(name)
                .ok_or_else(|| ClientError::NotFound(format!("role {name}")))
        }

        async fn create_role(
            &self,
            name: &str,
            permissions: PermissionSet,
        ) -> ClientResult<RoleRecord> {
            let mut roles = self.roles.lock().unwrap();
            if roles.contains_key(name) {
                return Err(ClientError::AlreadyExists(format!("role {name}")));
            }
            let record = RoleRecord {
                name: name.to_string(),
                is_core: false,
                version: 0,
                permissions,
            };
            roles.insert(name.to_string(), record.clone());
            Ok(record)
        }

        async fn update_role_permissions(
            &self,
            name: &str,
            permissions: PermissionSet,
            expected_version: Option<u64>,
        ) -> ClientResult<RoleRecord> {
            if self.fail_next_update.swap(false, Ordering::SeqCst) {
                return Err(ClientError::Unexpected {
                    status: 500,
                    message: "injected failure".to_string(),
                });
            }
            let mut roles = self.roles.lock().unwrap();
            let record = roles
                .get_mut(name)
                .ok_or_else(|| ClientError::NotFound(format!("role {name}")))?;
            if let Some(expected) = expected_version {
                if expected != record.version {
                    return Err(ClientError::Conflict(format!(
                        "role {name} is at version {}",
                        record.version
                    )));
                }
            }
            record.permissions = permissions;
            record.version += 1;
            Ok(record.clone())
        }

        async fn delete_role(&self, name: &str) -> ClientResult<()> {
            let mut roles = self.roles.lock().unwrap();
            let record = roles
                .get(name)
                .ok_or_else(|| ClientError::NotFound(format!("role {name}")))?;
            if record.is_core {
                return Err(ClientError::Forbidden(format!(
                    "role {name} is a core system role"
                )));
            }
            roles.remove(name);
            Ok(())
        }
    }

    fn catalog() -> &'static Catalog {
        Catalog::builtin()
    }

    fn seed_role(name: &str, is_core: bool) -> RoleRecord {
        RoleRecord {
            name: name.to_string(),
            is_core,
            version: 0,
            permissions: default_permissions(catalog()),
        }
    }

    fn session(seed: Vec<RoleRecord>) -> EditorSession<MockBackend> {
        EditorSession::new(MockBackend::new(seed), catalog())
    }

    #[tokio::test]
    async fn select_toggle_save_round_trip() {
        let mut session = session(vec![seed_role("Editor", true)]);
        session.select_role("Editor").await.expect("select");
        assert_eq!(session.selected_role(), Some("Editor"));
        assert!(!session.is_dirty());

        let enabled = session.toggle_feature("admin").expect("toggle");
        assert!(enabled);
        session.toggle_sub_feature("admin", "logs").expect("sub");
        assert!(session.is_dirty());

        session.save().await.expect("save");
        assert!(!session.is_dirty());

        let stored = session.backend.stored("Editor").expect("stored");
        assert_eq!(stored.version, 1);
        assert!(is_allowed(&stored.permissions, "admin", Some("logs")));
    }

    #[tokio::test]
    async fn disabling_a_feature_cascades_into_the_saved_map() {
        let mut seed = seed_role("Editor", true);
        toggle_feature(&mut seed.permissions, catalog(), "admin").expect("enable");
        toggle_sub_feature(&mut seed.permissions, catalog(), "admin", "logs").expect("sub");
        let mut session = session(vec![seed]);

        session.select_role("Editor").await.expect("select");
        let enabled = session.toggle_feature("admin").expect("toggle off");
        assert!(!enabled);
        session.save().await.expect("save");

        let stored = session.backend.stored("Editor").expect("stored");
        assert!(!stored.permissions["admin"].enabled);
        assert!(!stored.permissions["admin"].sub_features["logs"]);
    }

    #[tokio::test]
    async fn failed_save_keeps_the_working_copy_and_dirty_flag() {
        let mut session = session(vec![seed_role("Viewer", true)]);
        session.select_role("Viewer").await.expect("select");
        session.toggle_feature("home").expect("toggle");
        let before = session.working_permissions().cloned().expect("working");

        session
            .backend
            .fail_next_update
            .store(true, Ordering::SeqCst);
        let err = session.save().await.expect_err("save fails");
        assert!(matches!(err, EditorError::Backend(_)));
        assert!(session.is_dirty());
        assert_eq!(session.working_permissions(), Some(&before));

        // The retry goes through.
        session.save().await.expect("retry");
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn concurrent_save_surfaces_as_a_conflict() {
        let mut session = session(vec![seed_role("Viewer", true)]);
        session.select_role("Viewer").await.expect("select");
        session.toggle_feature("home").expect("toggle");

        // Another editor saved since this session loaded the role.
        session.backend.bump_version("Viewer");

        let err = session.save().await.expect_err("stale save");
        assert!(matches!(
            err,
            EditorError::Backend(ClientError::Conflict(_))
        ));
        assert!(session.is_dirty());

        // Reloading picks up the new version; the edit must be redone.
        session.select_role("Viewer").await.expect("reselect");
        assert!(!session.is_dirty());
        session.toggle_feature("home").expect("toggle again");
        session.save().await.expect("save after reload");
    }

    #[tokio::test]
    async fn selecting_another_role_discards_unsaved_edits() {
        let mut session = session(vec![seed_role("Viewer", true), seed_role("Legal", true)]);
        session.select_role("Viewer").await.expect("select");
        session.toggle_feature("home").expect("toggle");
        assert!(session.is_dirty());

        session.select_role("Legal").await.expect("switch");
        assert!(!session.is_dirty());

        // The abandoned edit never reached the store.
        let stored = session.backend.stored("Viewer").expect("stored");
        assert!(!stored.permissions["home"].enabled);
    }

    #[tokio::test]
    async fn discard_reverts_to_the_baseline() {
        let mut session = session(vec![seed_role("Viewer", true)]);
        session.select_role("Viewer").await.expect("select");
        session.toggle_feature("home").expect("toggle");
        session.toggle_sub_feature("home", "dashboard").expect("sub");
        assert!(session.is_dirty());

        session.discard().expect("discard");
        assert!(!session.is_dirty());
        assert_eq!(
            session.working_permissions(),
            Some(&default_permissions(catalog()))
        );
    }

    #[tokio::test]
    async fn create_role_validates_before_touching_the_backend() {
        let mut session = session(vec![seed_role("Viewer", true)]);

        assert!(matches!(
            session.create_role("   ").await,
            Err(EditorError::BlankName)
        ));
        assert!(matches!(
            session.create_role("Viewer").await,
            Err(EditorError::DuplicateName(_))
        ));
        // Case-sensitive match: a differently-cased name is a new role.
        session.create_role("viewer").await.expect("create");

        assert_eq!(session.selected_role(), Some("viewer"));
        let working = session.working_permissions().expect("working");
        assert!(!is_allowed(working, "home", None));
    }

    #[tokio::test]
    async fn delete_clears_selection_only_for_the_selected_role() {
        let mut session = session(vec![seed_role("Viewer", true)]);
        session.create_role("Marketing").await.expect("create");
        session.create_role("Campaigns").await.expect("create");
        assert_eq!(session.selected_role(), Some("Campaigns"));

        session.delete_role("Marketing").await.expect("delete other");
        assert_eq!(session.selected_role(), Some("Campaigns"));

        session.delete_role("Campaigns").await.expect("delete selected");
        assert_eq!(session.selected_role(), None);
    }

    #[tokio::test]
    async fn core_role_delete_fails_and_keeps_the_selection() {
        let mut session = session(vec![seed_role("Viewer", true)]);
        session.select_role("Viewer").await.expect("select");

        let err = session.delete_role("Viewer").await.expect_err("core");
        assert!(matches!(
            err,
            EditorError::Backend(ClientError::Forbidden(_))
        ));
        assert_eq!(session.selected_role(), Some("Viewer"));
        assert!(session.backend.stored("Viewer").is_some());
    }

    #[tokio::test]
    async fn operations_without_a_selection_are_rejected() {
        let mut session = session(vec![]);
        assert!(matches!(
            session.toggle_feature("home"),
            Err(EditorError::NoSelection)
        ));
        assert!(matches!(
            session.toggle_sub_feature("home", "dashboard"),
            Err(EditorError::NoSelection)
        ));
        assert!(matches!(session.discard(), Err(EditorError::NoSelection)));
        assert!(matches!(
            session.save().await,
            Err(EditorError::NoSelection)
        ));
    }

    #[tokio::test]
    async fn unknown_toggle_keys_do_not_dirty_the_session() {
        let mut session = session(vec![seed_role("Viewer", true)]);
        session.select_role("Viewer").await.expect("select");
        assert!(matches!(
            session.toggle_feature("nope"),
            Err(EditorError::Rbac(_))
        ));
        assert!(!session.is_dirty());
    }
}
