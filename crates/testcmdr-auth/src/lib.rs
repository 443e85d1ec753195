//! # testcmdr-auth
//!
//! Authorization for Test Commander: verification of provider-issued JWTs
//! and role-based access control over the closed [`RoleTag`] set.
//!
//! Authentication itself (credentials, sessions, password resets) is the
//! external identity provider's concern; this crate only reads and checks
//! the claims that provider puts in its tokens.
//!
//! [`RoleTag`]: testcmdr_entity::user::RoleTag

pub mod jwt;
pub mod rbac;

pub use rbac::enforcer::RbacEnforcer;
pub use rbac::policies::Permission;
