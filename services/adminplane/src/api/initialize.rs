//! Initialize API handler.
//!
//! # Purpose
//! Implements the first-run bootstrap flow that seeds the built-in role set.
//! The operation is deliberately destructive and idempotent: whatever roles
//! exist are replaced by the seed set, so re-running it resets the system to
//! a known state. It is not a migration.
use crate::api::error::{store_error_response, ApiError};
use crate::api::types::InitializeResponse;
use crate::app::AppState;
use crate::auth::guard::require_admin_role;
use crate::model::default_role_set;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

#[utoipa::path(
    post,
    path = "/v1/rbac/initialize",
    tag = "rbac",
    responses(
        (status = 200, description = "Role set reseeded", body = InitializeResponse),
        (status = 401, description = "Unauthenticated", body = crate::api::types::ErrorResponse),
        (status = 403, description = "Actor is not the administrator", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn initialize(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<InitializeResponse>, ApiError> {
    // Gated on the administrator role name: on first run there are no stored
    // permission maps to evaluate yet.
    let actor = require_admin_role(&headers)?;
    let seed = default_role_set(state.catalog);
    let roles_created = state
        .store
        .initialize(seed)
        .await
        .map_err(|err| store_error_response("failed to initialize roles", err))?;
    tracing::info!(actor_role = %actor.role, roles_created, "rbac role set reseeded");
    Ok(Json(InitializeResponse { roles_created }))
}
