//! API error types and helpers.
//!
//! # Purpose
//! Centralizes HTTP error response construction so every endpoint returns the
//! same `{code, message}` shape, and maps store failures onto HTTP statuses in
//! exactly one place. Internal errors log details server-side and return a
//! generic message.
use crate::api::types::ErrorResponse;
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Structured API error returned by handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: &str) -> Self {
        Self {
            status,
            body: ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
                request_id: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Build a 404 Not Found error.
pub fn api_not_found(message: &str) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not_found", message)
}

/// Build a 409 Conflict error with a caller-provided code.
pub fn api_conflict(code: &str, message: &str) -> ApiError {
    ApiError::new(StatusCode::CONFLICT, code, message)
}

/// Build a 403 Forbidden error.
pub fn api_forbidden(message: &str) -> ApiError {
    ApiError::new(StatusCode::FORBIDDEN, "forbidden", message)
}

/// Build a 401 Unauthorized error.
pub fn api_unauthorized(message: &str) -> ApiError {
    ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

/// Build a 400 Bad Request validation error.
pub fn api_validation_error(message: &str) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "validation_error", message)
}

/// Build a 400 for requests arriving before the role set is seeded.
pub fn api_not_initialized() -> ApiError {
    ApiError::new(
        StatusCode::BAD_REQUEST,
        "rbac_not_initialized",
        "RBAC system not initialized; run initialize first",
    )
}

/// Build a 500 Internal Server Error from a store error.
pub fn api_internal(message: &str, err: &StoreError) -> ApiError {
    tracing::error!(error = ?err, "adminplane storage error");
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

/// Map any store error onto the HTTP taxonomy.
///
/// `context` names the failed action and only reaches the client for the
/// internal branch, where the store detail is logged rather than returned.
pub fn store_error_response(context: &str, err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(message) => api_not_found(&message),
        StoreError::AlreadyExists(message) => api_conflict("already_exists", &message),
        StoreError::Forbidden(message) => api_forbidden(&message),
        StoreError::Conflict(message) => api_conflict("stale_version", &message),
        StoreError::Validation(message) => api_validation_error(&message),
        err @ StoreError::Unexpected(_) => api_internal(context, &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_build_expected_codes() {
        let not_found = api_not_found("missing");
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.body.code, "not_found");

        let conflict = api_conflict("already_exists", "conflict");
        assert_eq!(conflict.status, StatusCode::CONFLICT);
        assert_eq!(conflict.body.code, "already_exists");

        let forbidden = api_forbidden("nope");
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
        assert_eq!(forbidden.body.code, "forbidden");

        let unauthorized = api_unauthorized("who");
        assert_eq!(unauthorized.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unauthorized.body.code, "unauthorized");

        let validation = api_validation_error("bad");
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);
        assert_eq!(validation.body.code, "validation_error");

        let uninitialized = api_not_initialized();
        assert_eq!(uninitialized.status, StatusCode::BAD_REQUEST);
        assert_eq!(uninitialized.body.code, "rbac_not_initialized");
    }

    #[test]
    fn store_errors_map_onto_the_taxonomy() {
        let cases = vec![
            (
                StoreError::NotFound("role x".into()),
                StatusCode::NOT_FOUND,
                "not_found",
            ),
            (
                StoreError::AlreadyExists("role x".into()),
                StatusCode::CONFLICT,
                "already_exists",
            ),
            (
                StoreError::Forbidden("core".into()),
                StatusCode::FORBIDDEN,
                "forbidden",
            ),
            (
                StoreError::Conflict("stale".into()),
                StatusCode::CONFLICT,
                "stale_version",
            ),
            (
                StoreError::Validation("bad map".into()),
                StatusCode::BAD_REQUEST,
                "validation_error",
            ),
            (
                StoreError::Unexpected(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
            ),
        ];
        for (err, status, code) in cases {
            let api = store_error_response("failed", err);
            assert_eq!(api.status, status);
            assert_eq!(api.body.code, code);
        }
    }
}
