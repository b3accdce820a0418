//! Feature catalog API handler.
//!
//! # Purpose
//! Serves the compiled-in feature catalog so UI layers render toggles from
//! the same authoritative table the store validates against.
use crate::api::types::{CatalogFeature, CatalogResponse, CatalogSubFeature};
use crate::app::AppState;
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    get,
    path = "/v1/rbac/catalog",
    tag = "rbac",
    responses(
        (status = 200, description = "The feature catalog", body = CatalogResponse)
    )
)]
pub(crate) async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let features = state
        .catalog
        .features
        .iter()
        .map(|feature| CatalogFeature {
            key: feature.key.to_string(),
            name: feature.name.to_string(),
            sub_features: feature
                .sub_features
                .iter()
                .map(|sub| CatalogSubFeature {
                    key: sub.key.to_string(),
                    name: sub.name.to_string(),
                })
                .collect(),
        })
        .collect();
    Json(CatalogResponse { features })
}
