//! Admin-plane HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! This module centralizes route composition to keep `main` small and
//! testable.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::store::RoleStore;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use warden_rbac::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub api_version: String,
    pub catalog: &'static Catalog,
    pub store: Arc<dyn RoleStore>,
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            )
        });

    Router::new()
        .route(
            "/v1/system/info",
            axum::routing::get(api::system::system_info),
        )
        .route(
            "/v1/system/health",
            axum::routing::get(api::system::system_health),
        )
        .route(
            "/v1/rbac/catalog",
            axum::routing::get(api::catalog::get_catalog),
        )
        .route(
            "/v1/rbac/initialize",
            axum::routing::post(api::initialize::initialize),
        )
        .route(
            "/v1/roles",
            axum::routing::get(api::roles::list_roles).post(api::roles::create_role),
        )
        .route(
            "/v1/roles/:name",
            axum::routing::get(api::roles::get_role)
                .put(api::roles::update_role)
                .delete(api::roles::delete_role),
        )
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/v1/openapi.json", ApiDoc::openapi()),
        )
        .layer(trace_layer)
        .with_state(state)
}
