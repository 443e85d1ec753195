//! Tree operations over a project: lazy children, filtered whole-tree
//! rendering, and drag-drop moves.

pub mod service;
pub mod source;

pub use service::TreeService;
pub use source::ProjectTreeSource;
