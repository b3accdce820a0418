//! OpenAPI schema aggregation for the admin-plane API.
//!
//! # Purpose
//! Collects all routes and schema types into a single OpenAPI document for
//! docs and client generation.
use crate::api::{
    catalog, initialize, roles, system,
    types::{
        CatalogFeature, CatalogResponse, CatalogSubFeature, ErrorResponse, HealthStatus,
        InitializeResponse, RoleCreateRequest, RoleListResponse, RoleUpdateRequest, SystemInfo,
    },
};
use crate::model::Role;
use utoipa::OpenApi;
use warden_rbac::FeaturePermission;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "warden-adminplane",
        version = "v1",
        description = "Warden RBAC admin plane HTTP API"
    ),
    paths(
        system::system_info,
        system::system_health,
        catalog::get_catalog,
        initialize::initialize,
        roles::list_roles,
        roles::get_role,
        roles::create_role,
        roles::update_role,
        roles::delete_role
    ),
    components(schemas(
        ErrorResponse,
        SystemInfo,
        HealthStatus,
        Role,
        FeaturePermission,
        RoleListResponse,
        RoleCreateRequest,
        RoleUpdateRequest,
        InitializeResponse,
        CatalogResponse,
        CatalogFeature,
        CatalogSubFeature
    )),
    tags(
        (name = "system", description = "System and discovery endpoints"),
        (name = "rbac", description = "Catalog and bootstrap"),
        (name = "roles", description = "Role and permission management")
    )
)]
pub struct ApiDoc;
