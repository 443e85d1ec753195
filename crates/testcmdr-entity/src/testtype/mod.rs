//! Test-type taxonomy entities (global catalog + per-organization overlay).

pub mod model;
pub mod resolved;

pub use model::{GlobalTestType, OrgTestType, TypeStatus};
pub use resolved::{ResolvedCatalog, ResolvedTestType};
