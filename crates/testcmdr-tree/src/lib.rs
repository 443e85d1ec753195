//! # testcmdr-tree
//!
//! The folder/test-case tree subsystem: lazy child materialization with a
//! per-parent cache, filter evaluation over test-case leaves, expansion
//! state, and drag-drop move semantics with cycle protection.
//!
//! The subsystem is storage-agnostic: everything reads and writes through
//! the [`ChildSource`] trait, so it can run against the Postgres
//! repositories in production and an in-memory fixture in tests.

pub mod cache;
pub mod dragdrop;
pub mod expansion;
pub mod filter;
pub mod materializer;
pub mod node;
pub mod source;

pub use cache::ChildrenCache;
pub use dragdrop::{
    DragPayload, DropTarget, MoveOutcome, MoveRejection, folder_move_rejection, handle_drop,
};
pub use expansion::ExpansionController;
pub use filter::{FilterCriteria, passes_filters, strip_html};
pub use materializer::TreeMaterializer;
pub use node::{TreeNode, VisibleNode};
pub use source::ChildSource;
