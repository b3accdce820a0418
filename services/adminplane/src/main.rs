//! Warden admin-plane HTTP service entry point.
//!
//! # Purpose
//! Wires configuration, storage, and the HTTP router, then starts the API
//! server and the metrics listener.
//!
//! # Notes
//! The `build_state` helper keeps wiring testable and minimizes main setup
//! logic.
mod api;
mod app;
mod auth;
mod config;
mod model;
mod observability;
mod store;

use anyhow::Context;
use app::{build_router, AppState};
use std::future::Future;
use std::sync::Arc;
use store::{memory::InMemoryStore, postgres::PostgresStore, RoleStore};
use warden_rbac::Catalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::AdminPlaneConfig::from_env_or_yaml().context("admin plane config")?;
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: config::AdminPlaneConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability();
    let state = build_state(&config).await?;
    let metrics_task = tokio::spawn(observability::serve_metrics(
        metrics_handle,
        config.metrics_bind,
    ));

    let app = build_router(state.clone());

    let addr = config.bind_addr;
    tracing::info!(%addr, backend = state.store.backend_name(), "admin plane listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {}
    }

    metrics_task.abort();
    let _ = metrics_task.await;
    Ok(())
}

async fn build_state(config: &config::AdminPlaneConfig) -> anyhow::Result<AppState> {
    let catalog = Catalog::builtin();
    let store: Arc<dyn RoleStore> = match config.storage {
        config::StorageBackend::Memory => Arc::new(InMemoryStore::new(catalog)),
        config::StorageBackend::Postgres => {
            let pg = config
                .postgres
                .as_ref()
                .context("postgres configuration missing")?;
            Arc::new(
                PostgresStore::connect(pg, catalog)
                    .await
                    .map_err(|err| anyhow::anyhow!(err))?,
            )
        }
    };

    Ok(AppState {
        api_version: "v1".to_string(),
        catalog,
        store,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn memory_config() -> config::AdminPlaneConfig {
        config::AdminPlaneConfig {
            bind_addr: "127.0.0.1:0".parse().expect("bind"),
            metrics_bind: "127.0.0.1:0".parse().expect("metrics"),
            storage: config::StorageBackend::Memory,
            postgres: None,
        }
    }

    #[tokio::test]
    async fn build_state_memory_backend() {
        let state = build_state(&memory_config()).await.expect("state");
        assert_eq!(state.api_version, "v1");
        assert!(!state.store.is_durable());
        assert_eq!(state.store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn build_state_postgres_requires_config() {
        let config = config::AdminPlaneConfig {
            storage: config::StorageBackend::Postgres,
            ..memory_config()
        };
        let err = build_state(&config).await.err().expect("missing postgres");
        assert!(err.to_string().contains("postgres configuration missing"));
    }

    #[tokio::test]
    #[serial]
    async fn run_with_shutdown_starts_and_stops() {
        run_with_shutdown(memory_config(), async {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        })
        .await
        .expect("run should stop cleanly");
    }
}
