//! Postgres store round-trip tests.
//!
//! These run only when `WARDEN_TEST_DATABASE_URL` points at a disposable
//! Postgres database; without it every test skips so the suite passes in
//! environments without a database.
use adminplane::config::PostgresConfig;
use adminplane::model::default_role_set;
use adminplane::store::postgres::PostgresStore;
use adminplane::store::{RoleStore, StoreError};
use serial_test::serial;
use warden_rbac::{default_permissions, Catalog, PermissionSet};

fn test_config() -> Option<PostgresConfig> {
    std::env::var("WARDEN_TEST_DATABASE_URL")
        .ok()
        .map(|url| PostgresConfig {
            url,
            max_connections: 2,
            acquire_timeout_ms: 2_000,
        })
}

async fn connect() -> Option<PostgresStore> {
    let Some(pg) = test_config() else {
        eprintln!("skipping postgres test: WARDEN_TEST_DATABASE_URL not set");
        return None;
    };
    Some(
        PostgresStore::connect(&pg, Catalog::builtin())
            .await
            .expect("connect"),
    )
}

#[tokio::test]
#[serial]
async fn role_crud_round_trip() {
    let Some(store) = connect().await else { return };
    let catalog = Catalog::builtin();

    let created = store
        .initialize(default_role_set(catalog))
        .await
        .expect("seed");
    assert_eq!(created, 6);
    assert_eq!(store.role_count().await.expect("count"), 6);
    assert!(store.is_durable());
    assert_eq!(store.backend_name(), "postgres");
    store.health_check().await.expect("health");

    let viewer = store.get_role("Viewer").await.expect("get");
    assert!(viewer.is_core);
    assert_eq!(viewer.version, 0);

    let role = store
        .create_role("Marketing", default_permissions(catalog))
        .await
        .expect("create");
    assert!(!role.is_core);

    let err = store
        .create_role("Marketing", default_permissions(catalog))
        .await
        .expect_err("duplicate");
    assert!(matches!(err, StoreError::AlreadyExists(_)));

    let updated = store
        .update_role_permissions("Marketing", PermissionSet::new(), Some(0))
        .await
        .expect("update");
    assert_eq!(updated.version, 1);
    assert!(updated.permissions.is_empty());

    let err = store
        .update_role_permissions("Marketing", PermissionSet::new(), Some(0))
        .await
        .expect_err("stale");
    assert!(matches!(err, StoreError::Conflict(_)));

    let err = store.delete_role("ADMIN").await.expect_err("core");
    assert!(matches!(err, StoreError::Forbidden(_)));

    store.delete_role("Marketing").await.expect("delete");
    let err = store.get_role("Marketing").await.expect_err("gone");
    assert!(matches!(err, StoreError::NotFound(_)));

    // Reset for the next run.
    store
        .initialize(default_role_set(catalog))
        .await
        .expect("reseed");
}
