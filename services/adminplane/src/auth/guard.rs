//! Server-side admin guard for mutating endpoints.
//!
//! # Purpose
//! Role mutations are capability-gated: the actor's own stored role must hold
//! the relevant `admin` sub-feature. The guard loads the actor's permission
//! map from the store and evaluates it strictly; unlike the UI-side guard
//! there is no fail-open window here, a store failure is a 500 and an unknown
//! role denies.
//!
//! Initialize is the exception: on first run there are no stored roles to
//! evaluate, so it is gated on the administrator role name alone.
use crate::api::error::{
    api_forbidden, api_unauthorized, store_error_response, ApiError,
};
use crate::app::AppState;
use crate::auth::actor::{actor_from_headers, Actor};
use crate::store::StoreError;
use axum::http::HeaderMap;
use warden_rbac::{is_admin, Access, Evaluator};

/// Require an authenticated actor; 401 otherwise.
pub fn require_actor(headers: &HeaderMap) -> Result<Actor, ApiError> {
    actor_from_headers(headers).ok_or_else(|| api_unauthorized("missing actor role"))
}

/// Require the administrator role by name; used by initialize, which must
/// work before any roles exist.
pub fn require_admin_role(headers: &HeaderMap) -> Result<Actor, ApiError> {
    let actor = require_actor(headers)?;
    if !is_admin(&actor.role) {
        return Err(api_forbidden(&format!(
            "admin access required, actor role is {}",
            actor.role
        )));
    }
    Ok(actor)
}

/// Require that the actor's stored role grants `admin/{sub_feature}`.
///
/// Unknown actor roles deny rather than erroring: a stale session pointing at
/// a deleted role is an authorization failure, not a server fault.
pub async fn require_admin_capability(
    state: &AppState,
    headers: &HeaderMap,
    sub_feature: &str,
) -> Result<Actor, ApiError> {
    let actor = require_actor(headers)?;
    let evaluator = match state.store.get_role(&actor.role).await {
        Ok(role) => Evaluator::ready(role.permissions),
        Err(StoreError::NotFound(_)) => {
            return Err(api_forbidden(&format!(
                "admin/{sub_feature} required, actor role {} is unknown",
                actor.role
            )))
        }
        Err(err) => return Err(store_error_response("failed to load actor role", err)),
    };

    match evaluator.has_permission("admin", Some(sub_feature)) {
        Access::Allowed => Ok(actor),
        _ => Err(api_forbidden(&format!(
            "admin/{sub_feature} required, actor role is {}",
            actor.role
        ))),
    }
}
