//! HTTP API surface of the admin plane.
pub mod catalog;
pub mod error;
pub mod initialize;
pub mod openapi;
pub mod roles;
pub mod system;
pub mod types;

use crate::api::error::{api_not_initialized, store_error_response, ApiError};
use crate::app::AppState;

/// Reject role operations until the role set has been seeded.
///
/// Mirrors the first-run experience: everything except initialize and the
/// system endpoints answers 400 `rbac_not_initialized` on an empty store.
pub(crate) async fn ensure_initialized(state: &AppState) -> Result<(), ApiError> {
    let count = state
        .store
        .role_count()
        .await
        .map_err(|err| store_error_response("failed to count roles", err))?;
    if count == 0 {
        return Err(api_not_initialized());
    }
    Ok(())
}
