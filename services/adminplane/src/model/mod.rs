pub mod role;
pub mod seed;

pub use role::Role;
pub use seed::default_role_set;
