//! Tag domain entities.

pub mod model;
pub mod resolve;

pub use model::{Tag, TagSnapshot, UpsertTag};
pub use resolve::{ResolvedTag, resolve_tags};
