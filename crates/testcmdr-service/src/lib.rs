//! # testcmdr-service
//!
//! Business logic service layer for Test Commander. Each service
//! orchestrates repositories, the RBAC enforcer, and the tree subsystem
//! to implement application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references, and every operation takes a
//! [`RequestContext`] identifying the acting user.

pub mod context;
pub mod folder;
pub mod organization;
pub mod project;
pub(crate) mod scope;
pub mod tag;
pub mod test_case;
pub mod test_type;
pub mod tree;
pub mod user;

pub use context::RequestContext;
pub use folder::FolderService;
pub use organization::OrganizationService;
pub use project::ProjectService;
pub use tag::TagService;
pub use test_case::TestCaseService;
pub use test_type::TestTypeService;
pub use tree::{ProjectTreeSource, TreeService};
pub use user::UserService;
