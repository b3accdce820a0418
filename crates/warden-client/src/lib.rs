//! Client-side access to the Warden admin plane.
//!
//! # Purpose
//! Provides the REST client for the admin-plane role API and the role-editor
//! session used by admin UIs: a working copy of one role's permission map
//! with dirty tracking, cascade-preserving toggles, and explicit save/discard
//! semantics.
//!
//! # How it fits
//! UI layers own an [`EditorSession`] over a [`RoleBackend`] (the REST
//! [`AdminClient`] in production, a mock in tests) and an
//! [`warden_rbac::Evaluator`] loaded via [`AdminClient::load_permissions`]
//! for navigation guarding.

mod backend;
mod client;
mod editor;

pub use backend::{RoleBackend, RoleRecord};
pub use client::{AdminClient, ClientError, ClientResult};
pub use editor::{EditorError, EditorSession};
