//! Built-in role set used by the initialize operation.
//!
//! # Purpose
//! Defines the six core roles the admin plane seeds on first-run bootstrap.
//! Initialize destructively replaces whatever roles exist with exactly this
//! set. All six are core and therefore undeletable.
use super::Role;
use warden_rbac::{default_permissions, Catalog, FeaturePermission, PermissionSet};

fn perm(enabled: bool, subs: &[(&str, bool)]) -> FeaturePermission {
    FeaturePermission {
        enabled,
        sub_features: subs
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect(),
    }
}

/// Start from the all-disabled map and overlay the granted features, so
/// every role carries an explicit entry for every catalog feature.
fn role_map(catalog: &Catalog, grants: Vec<(&str, FeaturePermission)>) -> PermissionSet {
    let mut map = default_permissions(catalog);
    for (key, value) in grants {
        map.insert(key.to_string(), value);
    }
    map
}

fn core_role(name: &str, permissions: PermissionSet) -> Role {
    Role {
        name: name.to_string(),
        is_core: true,
        version: 0,
        permissions,
    }
}

/// Every feature and sub-feature enabled; the ADMIN baseline.
fn full_access(catalog: &Catalog) -> PermissionSet {
    catalog
        .features
        .iter()
        .map(|feature| {
            let subs = feature
                .sub_features
                .iter()
                .map(|sub| (sub.key.to_string(), true))
                .collect();
            (
                feature.key.to_string(),
                FeaturePermission {
                    enabled: true,
                    sub_features: subs,
                },
            )
        })
        .collect()
}

/// The seed role set: ADMIN, Legal, Non-Legal, Viewer, Editor, Sub-Admin.
pub fn default_role_set(catalog: &Catalog) -> Vec<Role> {
    let home_full = perm(
        true,
        &[("dashboard", true), ("recent", true), ("quick-actions", true)],
    );
    let settings_full = perm(
        true,
        &[("profile", true), ("preferences", true), ("notifications", true)],
    );
    let conversational_full = perm(true, &[("chat", true), ("history", true), ("assistant", true)]);
    let discover_full = perm(
        true,
        &[
            ("for-you", true),
            ("top", true),
            ("tech", true),
            ("finance", true),
            ("arts", true),
            ("sports", true),
            ("entertainment", true),
        ],
    );
    let discover_limited = perm(
        true,
        &[
            ("for-you", true),
            ("top", true),
            ("tech", false),
            ("finance", false),
            ("arts", true),
            ("sports", true),
            ("entertainment", true),
        ],
    );

    let legal = role_map(
        catalog,
        vec![
            ("home", home_full.clone()),
            ("settings", settings_full.clone()),
            ("conversational", conversational_full.clone()),
            (
                "visualize",
                perm(true, &[("charts", true), ("reports", true), ("analytics", false)]),
            ),
            ("discover", discover_full.clone()),
        ],
    );

    let non_legal = role_map(
        catalog,
        vec![
            ("home", home_full.clone()),
            ("settings", settings_full.clone()),
            ("conversational", conversational_full.clone()),
            (
                "visualize",
                perm(true, &[("charts", true), ("reports", false), ("analytics", false)]),
            ),
            ("discover", discover_limited.clone()),
        ],
    );

    let viewer = role_map(
        catalog,
        vec![
            (
                "home",
                perm(
                    true,
                    &[("dashboard", true), ("recent", true), ("quick-actions", false)],
                ),
            ),
            ("settings", settings_full.clone()),
            (
                "conversational",
                perm(true, &[("chat", true), ("history", true), ("assistant", false)]),
            ),
            (
                "visualize",
                perm(true, &[("charts", true), ("reports", false), ("analytics", false)]),
            ),
            ("discover", discover_limited),
        ],
    );

    // Editor's admin block stays fully disabled; the cascade forbids enabled
    // sub-features under a disabled feature.
    let editor = role_map(
        catalog,
        vec![
            ("home", home_full.clone()),
            ("settings", settings_full.clone()),
            ("conversational", conversational_full.clone()),
            (
                "visualize",
                perm(true, &[("charts", true), ("reports", true), ("analytics", true)]),
            ),
            (
                "users",
                perm(
                    true,
                    &[("all-users", true), ("add-user", false), ("user-roles", false)],
                ),
            ),
            (
                "config",
                perm(
                    true,
                    &[
                        ("system", true),
                        ("database", false),
                        ("api", true),
                        ("security", false),
                    ],
                ),
            ),
            ("discover", discover_full.clone()),
        ],
    );

    let sub_admin = role_map(
        catalog,
        vec![
            ("home", home_full),
            ("settings", settings_full),
            (
                "admin",
                perm(
                    true,
                    &[("users", true), ("roles", true), ("permissions", false), ("logs", true)],
                ),
            ),
            ("conversational", conversational_full),
            (
                "visualize",
                perm(true, &[("charts", true), ("reports", true), ("analytics", true)]),
            ),
            (
                "users",
                perm(
                    true,
                    &[("all-users", true), ("add-user", true), ("user-roles", true)],
                ),
            ),
            (
                "config",
                perm(
                    true,
                    &[
                        ("system", true),
                        ("database", true),
                        ("api", true),
                        ("security", false),
                    ],
                ),
            ),
            ("discover", discover_full),
        ],
    );

    vec![
        core_role("ADMIN", full_access(catalog)),
        core_role("Legal", legal),
        core_role("Non-Legal", non_legal),
        core_role("Viewer", viewer),
        core_role("Editor", editor),
        core_role("Sub-Admin", sub_admin),
    ]
}
