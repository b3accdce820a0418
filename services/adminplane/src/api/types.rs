//! HTTP API request/response types.
//!
//! # Purpose
//! Defines shared payload shapes for the admin-plane REST API and OpenAPI
//! schema generation.
use crate::model::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use warden_rbac::PermissionSet;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SystemInfo {
    pub service: String,
    pub api_version: String,
    pub storage_backend: String,
    pub durable_storage: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RoleListResponse {
    pub items: Vec<Role>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RoleCreateRequest {
    pub name: String,
    /// Omitted means the all-disabled default map.
    #[serde(default)]
    pub permissions: Option<PermissionSet>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RoleUpdateRequest {
    /// The complete replacement map; omitted features are dropped.
    pub permissions: PermissionSet,
    /// Version observed on read; a mismatch rejects the write.
    #[serde(default)]
    pub expected_version: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct InitializeResponse {
    pub roles_created: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CatalogSubFeature {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CatalogFeature {
    pub key: String,
    pub name: String,
    pub sub_features: Vec<CatalogSubFeature>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CatalogResponse {
    pub features: Vec<CatalogFeature>,
}
