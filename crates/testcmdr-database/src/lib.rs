//! # testcmdr-database
//!
//! PostgreSQL access for Test Commander: connection pool management,
//! embedded migrations, and one repository per entity.

pub mod connection;
pub mod migration;
pub mod repositories;
