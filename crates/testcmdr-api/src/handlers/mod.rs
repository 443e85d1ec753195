//! HTTP handlers, grouped by domain.

pub mod folder;
pub mod health;
pub mod organization;
pub mod project;
pub mod tag;
pub mod test_case;
pub mod test_type;
pub mod tree;
pub mod user;
