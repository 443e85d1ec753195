//! Role-based access control: policies, enforcement, and role-grant rules.

pub mod enforcer;
pub mod grants;
pub mod policies;

pub use enforcer::RbacEnforcer;
pub use grants::assignable_roles;
pub use policies::{Permission, RbacPolicies};
