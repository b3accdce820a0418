//! Two-level permission maps and the cascade rules that keep them coherent.
//!
//! # Purpose
//! A role's permissions are a map from feature key to a [`FeaturePermission`]:
//! a feature-level `enabled` flag plus per-sub-feature booleans. The cascade
//! invariant ties the two levels together:
//! - disabling a feature forces every one of its sub-features off
//! - enabling a sub-feature forces its parent feature on
//!
//! The toggles below preserve the invariant on every mutation. The store
//! additionally calls [`check_cascade`] on its write path, so a caller that
//! bypassed the toggles cannot persist an incoherent map.
use crate::catalog::Catalog;
use crate::errors::{RbacError, RbacResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Permission state for one feature: the feature-level switch plus one
/// boolean per sub-feature. Sub-features absent from the map are treated as
/// disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeaturePermission {
    pub enabled: bool,
    #[serde(default)]
    pub sub_features: BTreeMap<String, bool>,
}

/// A role's full permission map, keyed by feature key.
///
/// Serialized as a plain JSON object. A feature absent from the map denies
/// both the feature and all of its sub-features.
pub type PermissionSet = BTreeMap<String, FeaturePermission>;

/// Build the all-disabled permission map used when creating a new role.
///
/// Every catalog feature is present with `enabled = false` and every declared
/// sub-feature explicitly false, matching the map the editor renders for a
/// fresh role.
pub fn default_permissions(catalog: &Catalog) -> PermissionSet {
    catalog
        .features
        .iter()
        .map(|feature| {
            let sub_features = feature
                .sub_features
                .iter()
                .map(|sub| (sub.key.to_string(), false))
                .collect();
            (
                feature.key.to_string(),
                FeaturePermission {
                    enabled: false,
                    sub_features,
                },
            )
        })
        .collect()
}

/// Flip a feature's `enabled` flag, returning the new value.
///
/// When the flip lands on `false`, every sub-feature of that feature is
/// forced off. A feature key not present in the catalog is an error; a
/// feature missing from the map is treated as currently disabled.
pub fn toggle_feature(
    perms: &mut PermissionSet,
    catalog: &Catalog,
    feature_key: &str,
) -> RbacResult<bool> {
    if catalog.feature(feature_key).is_none() {
        return Err(RbacError::UnknownFeature(feature_key.to_string()));
    }
    let entry = perms.entry(feature_key.to_string()).or_default();
    entry.enabled = !entry.enabled;
    if !entry.enabled {
        for value in entry.sub_features.values_mut() {
            *value = false;
        }
    }
    Ok(entry.enabled)
}

/// Flip one sub-feature, returning the new value.
///
/// When the flip lands on `true`, the parent feature's `enabled` flag is
/// forced on. Sibling sub-features are untouched.
pub fn toggle_sub_feature(
    perms: &mut PermissionSet,
    catalog: &Catalog,
    feature_key: &str,
    sub_key: &str,
) -> RbacResult<bool> {
    if catalog.feature(feature_key).is_none() {
        return Err(RbacError::UnknownFeature(feature_key.to_string()));
    }
    if !catalog.has_sub_feature(feature_key, sub_key) {
        return Err(RbacError::UnknownSubFeature {
            feature: feature_key.to_string(),
            sub_feature: sub_key.to_string(),
        });
    }
    let entry = perms.entry(feature_key.to_string()).or_default();
    let value = entry.sub_features.entry(sub_key.to_string()).or_insert(false);
    *value = !*value;
    let enabled = *value;
    if enabled {
        entry.enabled = true;
    }
    Ok(enabled)
}

/// Answer a feature or sub-feature access query against a loaded map.
///
/// Denies when the feature is absent or disabled. With a sub-feature key the
/// answer is that flag's value, absent flags denying. Without one, an enabled
/// feature allows.
pub fn is_allowed(perms: &PermissionSet, feature_key: &str, sub_key: Option<&str>) -> bool {
    let Some(feature) = perms.get(feature_key) else {
        return false;
    };
    if !feature.enabled {
        return false;
    }
    match sub_key {
        Some(sub) => feature.sub_features.get(sub).copied().unwrap_or(false),
        None => true,
    }
}

/// Validate a permission map against the catalog and the cascade invariant.
///
/// Rejects keys the catalog does not declare and maps where a disabled
/// feature still carries an enabled sub-feature. Features omitted from the
/// map are fine; full-replace updates may legitimately drop them.
pub fn check_cascade(perms: &PermissionSet, catalog: &Catalog) -> RbacResult<()> {
    for (feature_key, feature) in perms {
        if catalog.feature(feature_key).is_none() {
            return Err(RbacError::UnknownFeature(feature_key.clone()));
        }
        for (sub_key, enabled) in &feature.sub_features {
            if !catalog.has_sub_feature(feature_key, sub_key) {
                return Err(RbacError::UnknownSubFeature {
                    feature: feature_key.clone(),
                    sub_feature: sub_key.clone(),
                });
            }
            if *enabled && !feature.enabled {
                return Err(RbacError::CascadeViolation {
                    feature: feature_key.clone(),
                    sub_feature: sub_key.clone(),
                });
            }
        }
    }
    Ok(())
}
