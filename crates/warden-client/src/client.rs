//! REST client for the admin-plane role API.
//!
//! # Purpose
//! Wraps `reqwest` with the role operations, mapping the admin plane's
//! `{code, message}` error bodies back onto a typed [`ClientError`] so
//! callers can distinguish "role vanished" from "someone else saved first"
//! from "network flaked".
use crate::backend::{RoleBackend, RoleRecord};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use warden_rbac::{decide, requirement_for_path, AuthState, Evaluator, GuardDecision, PermissionSet};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
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
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response ({status}): {message}")]
    Unexpected { status: u16, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RoleListBody {
    items: Vec<RoleRecord>,
}

#[derive(Debug, Deserialize)]
struct InitializeBody {
    roles_created: usize,
}

/// Typed client for the admin-plane REST API.
///
/// Carries the actor's role so the admin plane can authorize each request;
/// authenticating the actor is the fronting auth layer's job.
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    actor_role: String,
}

impl AdminClient {
    pub fn new(base_url: impl Into<String>, actor_role: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            actor_role: actor_role.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header("x-warden-role", &self.actor_role)
    }

    async fn error_from_response(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response.json::<ErrorBody>().await.unwrap_or(ErrorBody {
            code: "unknown".to_string(),
            message: "unparseable error body".to_string(),
        });
        match body.code.as_str() {
            "not_found" => ClientError::NotFound(body.message),
            "already_exists" => ClientError::AlreadyExists(body.message),
            "forbidden" => ClientError::Forbidden(body.message),
            "stale_version" => ClientError::Conflict(body.message),
            "validation_error" | "rbac_not_initialized" => ClientError::Validation(body.message),
            "unauthorized" => ClientError::Unauthorized(body.message),
            _ => ClientError::Unexpected {
                status,
                message: body.message,
            },
        }
    }

    async fn expect_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(response.json::<T>().await?)
    }

    /// Destructively reseed the role set; returns how many roles were created.
    pub async fn initialize(&self) -> ClientResult<usize> {
        let response = self
            .request(reqwest::Method::POST, "/v1/rbac/initialize")
            .send()
            .await?;
        let body: InitializeBody = Self::expect_json(response).await?;
        Ok(body.roles_created)
    }

    /// Load the actor's own permission map into an evaluator.
    ///
    /// An unknown role yields a ready, empty evaluator (default-deny); only
    /// transport and server failures leave the evaluator in the failed state
    /// that keeps the fail-open window alive.
    pub async fn load_permissions(&self, role: &str) -> Evaluator {
        match self.get_role(role).await {
            Ok(record) => Evaluator::ready(record.permissions),
            Err(ClientError::NotFound(_)) => Evaluator::ready(PermissionSet::new()),
            Err(_) => Evaluator::failed(),
        }
    }

    /// Resolve one navigation attempt against the static route table.
    ///
    /// The permission map is only fetched for authenticated actors; the
    /// guard settles unresolved and anonymous auth without a network call.
    pub async fn guard_navigation(&self, auth: &AuthState, path: &str) -> GuardDecision {
        let requirement = requirement_for_path(path);
        let evaluator = match auth {
            AuthState::Authenticated { role } => self.load_permissions(role).await,
            _ => Evaluator::loading(),
        };
        decide(auth, &requirement, &evaluator)
    }
}

#[async_trait]
impl RoleBackend for AdminClient {
    async fn list_roles(&self) -> ClientResult<Vec<RoleRecord>> {
        let response = self.request(reqwest::Method::GET, "/v1/roles").send().await?;
        let body: RoleListBody = Self::expect_json(response).await?;
        Ok(body.items)
    }

    async fn get_role(&self, name: &str) -> ClientResult<RoleRecord> {
        let response = self
            .request(reqwest::Method::GET, &format!("/v1/roles/{name}"))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    async fn create_role(
        &self,
        name: &str,
        permissions: PermissionSet,
    ) -> ClientResult<RoleRecord> {
        let response = self
            .request(reqwest::Method::POST, "/v1/roles")
            .json(&serde_json::json!({ "name": name, "permissions": permissions }))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    async fn update_role_permissions(
        &self,
        name: &str,
        permissions: PermissionSet,
        expected_version: Option<u64>,
    ) -> ClientResult<RoleRecord> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/v1/roles/{name}"))
            .json(&serde_json::json!({
                "permissions": permissions,
                "expected_version": expected_version,
            }))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    async fn delete_role(&self, name: &str) -> ClientResult<()> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/v1/roles/{name}"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = AdminClient::new("http://localhost:8080/", "ADMIN").expect("client");
        assert_eq!(client.url("/v1/roles"), "http://localhost:8080/v1/roles");
    }

    #[tokio::test]
    async fn navigation_guard_settles_without_a_network_call_when_unauthenticated() {
        // Port 9 is discard; any send would fail, but these paths never send.
        let client = AdminClient::new("http://127.0.0.1:9", "Viewer").expect("client");
        let decision = client
            .guard_navigation(&AuthState::Anonymous, "/dashboard")
            .await;
        assert_eq!(decision, GuardDecision::RedirectLogin);

        let decision = client
            .guard_navigation(&AuthState::Unresolved, "/dashboard")
            .await;
        assert_eq!(decision, GuardDecision::Loading);
    }

    #[test]
    fn error_variants_render() {
        let errors = vec![
            ClientError::NotFound("role".to_string()),
            ClientError::AlreadyExists("role".to_string()),
            ClientError::Forbidden("core".to_string()),
            ClientError::Conflict("stale".to_string()),
            ClientError::Validation("bad".to_string()),
            ClientError::Unauthorized("who".to_string()),
            ClientError::Unexpected {
                status: 500,
                message: "boom".to_string(),
            },
        ];
        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
