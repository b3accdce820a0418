//! Role API handlers.
//!
//! # Purpose
//! Implements role CRUD with consistent error mapping for store conflicts,
//! missing records, and the admin capability gate on mutations.
//!
//! Reads require any authenticated actor (clients fetch their own role's map
//! to evaluate permissions); mutations additionally require the actor's
//! stored role to grant `admin/roles`.
use crate::api::ensure_initialized;
use crate::api::error::{store_error_response, ApiError};
use crate::api::types::{RoleCreateRequest, RoleListResponse, RoleUpdateRequest};
use crate::app::AppState;
use crate::auth::guard::{require_actor, require_admin_capability};
use crate::model::Role;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use warden_rbac::default_permissions;

#[utoipa::path(
    get,
    path = "/v1/roles",
    tag = "roles",
    responses(
        (status = 200, description = "List roles", body = RoleListResponse),
        (status = 400, description = "RBAC not initialized", body = crate::api::types::ErrorResponse),
        (status = 401, description = "Unauthenticated", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RoleListResponse>, ApiError> {
    require_actor(&headers)?;
    ensure_initialized(&state).await?;
    let items = state
        .store
        .list_roles()
        .await
        .map_err(|err| store_error_response("failed to list roles", err))?;
    Ok(Json(RoleListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/roles/{name}",
    tag = "roles",
    params(("name" = String, Path, description = "Role name")),
    responses(
        (status = 200, description = "Role with its permission map", body = Role),
        (status = 404, description = "Role not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_role(
    Path(name): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Role>, ApiError> {
    require_actor(&headers)?;
    ensure_initialized(&state).await?;
    let role = state
        .store
        .get_role(&name)
        .await
        .map_err(|err| store_error_response("failed to load role", err))?;
    Ok(Json(role))
}

#[utoipa::path(
    post,
    path = "/v1/roles",
    tag = "roles",
    request_body = RoleCreateRequest,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, description = "Invalid name or permission map", body = crate::api::types::ErrorResponse),
        (status = 403, description = "Actor lacks admin/roles", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Role already exists", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<RoleCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_actor(&headers)?;
    ensure_initialized(&state).await?;
    require_admin_capability(&state, &headers, "roles").await?;
    let permissions = body
        .permissions
        .unwrap_or_else(|| default_permissions(state.catalog));
    let role = state
        .store
        .create_role(&body.name, permissions)
        .await
        .map_err(|err| store_error_response("failed to create role", err))?;
    Ok((StatusCode::CREATED, Json(role)))
}

#[utoipa::path(
    put,
    path = "/v1/roles/{name}",
    tag = "roles",
    params(("name" = String, Path, description = "Role name")),
    request_body = RoleUpdateRequest,
    responses(
        (status = 200, description = "Role permissions replaced", body = Role),
        (status = 400, description = "Invalid permission map", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Role not found", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Stale version token", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_role(
    Path(name): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<RoleUpdateRequest>,
) -> Result<Json<Role>, ApiError> {
    require_actor(&headers)?;
    ensure_initialized(&state).await?;
    require_admin_capability(&state, &headers, "roles").await?;
    let role = state
        .store
        .update_role_permissions(&name, body.permissions, body.expected_version)
        .await
        .map_err(|err| store_error_response("failed to update role", err))?;
    Ok(Json(role))
}

#[utoipa::path(
    delete,
    path = "/v1/roles/{name}",
    tag = "roles",
    params(("name" = String, Path, description = "Role name")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 403, description = "Core role or actor lacks admin/roles", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Role not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_role(
    Path(name): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    require_actor(&headers)?;
    ensure_initialized(&state).await?;
    require_admin_capability(&state, &headers, "roles").await?;
    state
        .store
        .delete_role(&name)
        .await
        .map_err(|err| store_error_response("failed to delete role", err))?;
    Ok(StatusCode::NO_CONTENT)
}
