//! Postgres-backed implementation of the role store.
//!
//! # What this module is
//! Implements [`RoleStore`] using Postgres (via `sqlx`) as the durable,
//! shared backing store for role records. Permission maps are stored as a
//! JSONB column; the map is an opaque document to SQL and is validated
//! against the catalog before every write.
//!
//! # Consistency
//! - Each mutation is a single transaction; `SELECT ... FOR UPDATE` pins the
//!   row so the version check and the write observe the same state.
//! - The `version` column is the concurrency token: it increments on every
//!   permissions update and a stale `expected_version` aborts the write.
//!
//! # Operational notes
//! - Migrations run at connect via `sqlx::migrate!` so the schema is present
//!   before the service accepts requests.
//! - Connection pooling and acquire timeouts are explicit; hanging forever on
//!   a dead database is unacceptable for an admin plane.
//! - Database URLs may contain credentials; they are never logged.
use super::{validate_permissions, validate_role_name, RoleStore, StoreError, StoreResult};
use crate::config::PostgresConfig;
use crate::model::Role;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use std::time::Duration;
use warden_rbac::{Catalog, PermissionSet};

/// Durable role store backed by Postgres.
pub struct PostgresStore {
    catalog: &'static Catalog,
    pool: PgPool,
}

/// Row shape for the `roles` table.
///
/// Kept separate from the domain [`Role`] so schema details (JSONB payload,
/// signed integer version) stay out of the API model and parsing happens in
/// exactly one place.
#[derive(Debug, Clone, FromRow)]
struct DbRole {
    name: String,
    is_core: bool,
    version: i64,
    permissions: Value,
}

fn role_from_db(row: DbRole) -> StoreResult<Role> {
    let permissions: PermissionSet = serde_json::from_value(row.permissions)
        .map_err(|err| StoreError::Unexpected(err.into()))?;
    Ok(Role {
        name: row.name,
        is_core: row.is_core,
        version: row.version as u64,
        permissions,
    })
}

fn permissions_to_json(permissions: &PermissionSet) -> StoreResult<Value> {
    serde_json::to_value(permissions).map_err(|err| StoreError::Unexpected(err.into()))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.code().map(|code| code == "23505").unwrap_or(false);
    }
    false
}

impl PostgresStore {
    /// Connect to Postgres, run migrations, and return a ready store.
    pub async fn connect(pg: &PostgresConfig, catalog: &'static Catalog) -> StoreResult<Self> {
        let options =
            PgConnectOptions::from_str(&pg.url).map_err(|err| StoreError::Unexpected(err.into()))?;
        let pool = PgPoolOptions::new()
            .max_connections(pg.max_connections)
            .acquire_timeout(Duration::from_millis(pg.acquire_timeout_ms))
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|err| StoreError::Unexpected(err.into()))?;
        Ok(Self { catalog, pool })
    }
}

#[async_trait]
impl RoleStore for PostgresStore {
    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, DbRole>(
            "SELECT name, is_core, version, permissions FROM roles ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(role_from_db).collect()
    }

    async fn get_role(&self, name: &str) -> StoreResult<Role> {
        let row = sqlx::query_as::<_, DbRole>(
            "SELECT name, is_core, version, permissions FROM roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => role_from_db(row),
            None => Err(StoreError::NotFound(format!("role {name}"))),
        }
    }

    async fn create_role(&self, name: &str, permissions: PermissionSet) -> StoreResult<Role> {
        validate_role_name(name)?;
        validate_permissions(&permissions, self.catalog)?;
        let payload = permissions_to_json(&permissions)?;
        let insert = sqlx::query(
            r#"INSERT INTO roles (name, is_core, version, permissions) VALUES ($1, FALSE, 0, $2)"#,
        )
        .bind(name)
        .bind(&payload)
        .execute(&self.pool)
        .await;
        if let Err(err) = insert {
            if is_unique_violation(&err) {
                return Err(StoreError::AlreadyExists(format!("role {name}")));
            }
            return Err(err.into());
        }
        metrics::counter!("warden_role_changes_total", "op" => "created").increment(1);
        Ok(Role::new(name, permissions))
    }

    async fn update_role_permissions(
        &self,
        name: &str,
        permissions: PermissionSet,
        expected_version: Option<u64>,
    ) -> StoreResult<Role> {
        validate_permissions(&permissions, self.catalog)?;
        let payload = permissions_to_json(&permissions)?;
        let mut tx = self.pool.begin().await?;

        // Pin the row so the version check and the write see the same state.
        let current = sqlx::query_as::<_, DbRole>(
            "SELECT name, is_core, version, permissions FROM roles WHERE name = $1 FOR UPDATE",
        )
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("role {name}")))?;

        if let Some(expected) = expected_version {
            if expected != current.version as u64 {
                return Err(StoreError::Conflict(format!(
                    "role {name} is at version {}, caller expected {expected}",
                    current.version
                )));
            }
        }

        sqlx::query("UPDATE roles SET permissions = $1, version = version + 1 WHERE name = $2")
            .bind(&payload)
            .bind(name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        metrics::counter!("warden_role_changes_total", "op" => "updated").increment(1);
        Ok(Role {
            name: name.to_string(),
            is_core: current.is_core,
            version: current.version as u64 + 1,
            permissions,
        })
    }

    async fn delete_role(&self, name: &str) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        let is_core = sqlx::query_scalar::<_, bool>(
            "SELECT is_core FROM roles WHERE name = $1 FOR UPDATE",
        )
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("role {name}")))?;

        if is_core {
            return Err(StoreError::Forbidden(format!(
                "role {name} is a core system role"
            )));
        }

        sqlx::query("DELETE FROM roles WHERE name = $1")
            .bind(name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        metrics::counter!("warden_role_changes_total", "op" => "deleted").increment(1);
        Ok(())
    }

    async fn initialize(&self, seed: Vec<Role>) -> StoreResult<usize> {
        for role in &seed {
            validate_role_name(&role.name)?;
            validate_permissions(&role.permissions, self.catalog)?;
        }
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM roles").execute(&mut *tx).await?;
        let created = seed.len();
        for role in seed {
            let payload = permissions_to_json(&role.permissions)?;
            sqlx::query(
                r#"INSERT INTO roles (name, is_core, version, permissions) VALUES ($1, $2, $3, $4)"#,
            )
            .bind(&role.name)
            .bind(role.is_core)
            .bind(role.version as i64)
            .bind(&payload)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        metrics::counter!("warden_role_changes_total", "op" => "initialized").increment(1);
        Ok(created)
    }

    async fn role_count(&self) -> StoreResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

// Exercised against a real database by `tests/pg_store.rs`, which skips
// itself unless WARDEN_TEST_DATABASE_URL is set.
