//! Static feature catalog.
//!
//! # Purpose
//! Defines the universe of togglable capabilities as one immutable table
//! shared by reference across the model, evaluator, and editors. Per-role
//! permission maps are keyed by the feature and sub-feature keys declared
//! here; keys not in the catalog are rejected at the store boundary.
/// A finer-grained capability nested under a feature.
#[derive(Debug, Clone, Copy)]
pub struct SubFeatureDef {
    pub key: &'static str,
    pub name: &'static str,
}

/// A top-level togglable capability area.
#[derive(Debug, Clone, Copy)]
pub struct FeatureDef {
    pub key: &'static str,
    pub name: &'static str,
    pub sub_features: &'static [SubFeatureDef],
}

/// Ordered, read-only list of feature definitions.
///
/// Feature keys are globally unique; sub-feature keys are unique within
/// their parent feature. The builtin catalog upholds this by construction
/// and the invariant is asserted in tests.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub features: &'static [FeatureDef],
}

const fn sub(key: &'static str, name: &'static str) -> SubFeatureDef {
    SubFeatureDef { key, name }
}

static FEATURES: &[FeatureDef] = &[
    FeatureDef {
        key: "home",
        name: "Home",
        sub_features: &[
            sub("dashboard", "Dashboard"),
            sub("recent", "Recent Activity"),
            sub("quick-actions", "Quick Actions"),
        ],
    },
    FeatureDef {
        key: "settings",
        name: "Settings",
        sub_features: &[
            sub("profile", "Profile Settings"),
            sub("preferences", "Preferences"),
            sub("notifications", "Notifications"),
        ],
    },
    FeatureDef {
        key: "admin",
        name: "Admin",
        sub_features: &[
            sub("users", "User Management"),
            sub("roles", "Role Settings"),
            sub("permissions", "Permissions"),
            sub("logs", "System Logs"),
        ],
    },
    FeatureDef {
        key: "conversational",
        name: "Conversational",
        sub_features: &[
            sub("chat", "Chat Interface"),
            sub("history", "Message History"),
            sub("assistant", "AI Assistant"),
        ],
    },
    FeatureDef {
        key: "visualize",
        name: "Visualize",
        sub_features: &[
            sub("charts", "Charts"),
            sub("reports", "Reports"),
            sub("analytics", "Analytics"),
        ],
    },
    FeatureDef {
        key: "users",
        name: "Users",
        sub_features: &[
            sub("all-users", "All Users"),
            sub("add-user", "Add User"),
            sub("user-roles", "User Roles"),
        ],
    },
    FeatureDef {
        key: "config",
        name: "Config",
        sub_features: &[
            sub("system", "System Settings"),
            sub("database", "Database Config"),
            sub("api", "API Settings"),
            sub("security", "Security"),
        ],
    },
    FeatureDef {
        key: "discover",
        name: "Discover",
        sub_features: &[
            sub("for-you", "For You"),
            sub("top", "Top"),
            sub("tech", "Tech & Science"),
            sub("finance", "Finance"),
            sub("arts", "Arts & Culture"),
            sub("sports", "Sports"),
            sub("entertainment", "Entertainment"),
        ],
    },
];

static BUILTIN: Catalog = Catalog { features: FEATURES };

impl Catalog {
    /// The compiled-in catalog used by the admin plane.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Look up a feature definition by key.
    pub fn feature(&self, key: &str) -> Option<&FeatureDef> {
        self.features.iter().find(|feature| feature.key == key)
    }

    /// Whether `sub_key` is declared under `feature_key`.
    pub fn has_sub_feature(&self, feature_key: &str, sub_key: &str) -> bool {
        self.feature(feature_key)
            .map(|feature| feature.sub_features.iter().any(|s| s.key == sub_key))
            .unwrap_or(false)
    }
}
