//! # testcmdr-entity
//!
//! Domain entity models for Test Commander. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod folder;
pub mod organization;
pub mod project;
pub mod tag;
pub mod testcase;
pub mod testtype;
pub mod user;
