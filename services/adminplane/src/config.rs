use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

pub const DEFAULT_PG_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_PG_ACQUIRE_TIMEOUT_MS: u64 = 5_000;

// Admin plane configuration sourced from environment variables, with an
// optional YAML override file via WARDEN_CONFIG.
#[derive(Debug, Clone)]
pub struct AdminPlaneConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub storage: StorageBackend,
    pub postgres: Option<PostgresConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
struct AdminPlaneConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    storage: Option<String>,
    postgres_url: Option<String>,
}

fn parse_backend(value: &str) -> Result<StorageBackend> {
    match value {
        "memory" => Ok(StorageBackend::Memory),
        "postgres" => Ok(StorageBackend::Postgres),
        other => bail!("unknown storage backend: {other}"),
    }
}

impl AdminPlaneConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("WARDEN_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .with_context(|| "parse WARDEN_BIND")?;
        let metrics_bind = std::env::var("WARDEN_METRICS_BIND")
            .unwrap_or_else(|_| "0.0.0.0:9100".to_string())
            .parse()
            .with_context(|| "parse WARDEN_METRICS_BIND")?;
        let storage = parse_backend(
            &std::env::var("WARDEN_STORAGE").unwrap_or_else(|_| "memory".to_string()),
        )?;
        let postgres = match std::env::var("WARDEN_PG_URL") {
            Ok(url) => {
                let max_connections = std::env::var("WARDEN_PG_MAX_CONNECTIONS")
                    .ok()
                    .map(|value| value.parse().with_context(|| "parse WARDEN_PG_MAX_CONNECTIONS"))
                    .transpose()?
                    .unwrap_or(DEFAULT_PG_MAX_CONNECTIONS);
                let acquire_timeout_ms = std::env::var("WARDEN_PG_ACQUIRE_TIMEOUT_MS")
                    .ok()
                    .map(|value| {
                        value
                            .parse()
                            .with_context(|| "parse WARDEN_PG_ACQUIRE_TIMEOUT_MS")
                    })
                    .transpose()?
                    .unwrap_or(DEFAULT_PG_ACQUIRE_TIMEOUT_MS);
                Some(PostgresConfig {
                    url,
                    max_connections,
                    acquire_timeout_ms,
                })
            }
            Err(_) => None,
        };
        Ok(Self {
            bind_addr,
            metrics_bind,
            storage,
            postgres,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("WARDEN_CONFIG") {
            let contents =
                fs::read_to_string(&path).with_context(|| format!("read WARDEN_CONFIG: {path}"))?;
            let override_cfg: AdminPlaneConfigOverride =
                serde_yaml::from_str(&contents).with_context(|| "parse admin plane config yaml")?;
            if let Some(value) = override_cfg.bind_addr {
                config.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
            }
            if let Some(value) = override_cfg.metrics_bind {
                config.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
            }
            if let Some(value) = override_cfg.storage {
                config.storage = parse_backend(&value)?;
            }
            if let Some(url) = override_cfg.postgres_url {
                config.postgres = Some(PostgresConfig {
                    url,
                    max_connections: DEFAULT_PG_MAX_CONNECTIONS,
                    acquire_timeout_ms: DEFAULT_PG_ACQUIRE_TIMEOUT_MS,
                });
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parsing() {
        assert_eq!(parse_backend("memory").expect("memory"), StorageBackend::Memory);
        assert_eq!(
            parse_backend("postgres").expect("postgres"),
            StorageBackend::Postgres
        );
        assert!(parse_backend("mongo").is_err());
    }
}
