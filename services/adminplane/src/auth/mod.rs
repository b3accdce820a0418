//! Actor identity and the server-side admin guard.
//!
//! Authentication itself is an external collaborator's job; the admin plane
//! trusts the actor role asserted by the fronting auth layer and authorizes
//! against the stored permission maps.
pub mod actor;
pub mod guard;

pub use actor::{actor_from_headers, Actor, ACTOR_ROLE_HEADER};
pub use guard::{require_actor, require_admin_capability, require_admin_role};
