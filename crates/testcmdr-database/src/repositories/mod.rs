//! Repository implementations, one per entity table.

pub mod folder;
pub mod organization;
pub mod project;
pub mod tag;
pub mod test_case;
pub mod test_type;
pub mod user;
