//! Drag-drop move handling with cycle protection.

use serde::{Deserialize, Serialize};
use tracing::info;

use testcmdr_core::AppResult;
use testcmdr_core::types::{FolderId, TestCaseId};

use crate::materializer::TreeMaterializer;
use crate::source::ChildSource;

/// Upper bound on the ancestor walk during legality checking. Guards
/// against unbounded loops over corrupt parent chains.
const MAX_ANCESTRY_HOPS: usize = 1000;

/// What a drag gesture carries: the node being moved and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DragPayload {
    /// A folder node.
    #[serde(rename = "folder")]
    Folder {
        id: FolderId,
        source_parent_id: Option<FolderId>,
    },
    /// A test-case node.
    #[serde(rename = "tc")]
    Case {
        id: TestCaseId,
        source_folder_id: Option<FolderId>,
    },
}

/// Where the node was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// The project root.
    Root,
    /// A folder node.
    Folder(FolderId),
}

impl DropTarget {
    fn as_parent(self) -> Option<FolderId> {
        match self {
            DropTarget::Root => None,
            DropTarget::Folder(id) => Some(id),
        }
    }
}

/// Result of handling a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The move was applied and both affected parents were reloaded.
    Moved,
    /// Source and target are the same parent; nothing happened.
    Noop,
    /// The move is illegal and nothing was written.
    Rejected { reason: MoveRejection },
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveRejection {
    /// A folder dropped onto itself.
    IntoSelf,
    /// A folder dropped into its own subtree, which would create a cycle.
    IntoOwnDescendant,
    /// A test case dropped on the root; cases must live in a folder.
    CaseAtRoot,
    /// The target's ancestor chain could not be resolved within the hop
    /// bound; refused rather than risk writing a cycle.
    UnresolvableAncestry,
}

impl MoveRejection {
    /// Human-readable reason, used in error payloads.
    pub fn reason(&self) -> &'static str {
        match self {
            MoveRejection::IntoSelf => "A folder cannot be moved into itself",
            MoveRejection::IntoOwnDescendant => {
                "A folder cannot be moved into its own descendant"
            }
            MoveRejection::CaseAtRoot => "A test case must be placed inside a folder",
            MoveRejection::UnresolvableAncestry => {
                "The target folder's ancestry could not be verified"
            }
        }
    }
}

/// Applies a drop gesture: validates legality, issues the move through the
/// store, and reloads the two affected parent entries.
///
/// Reloads read back from the store rather than patching the cache from
/// the payload, so a store-level refusal simply shows up as unchanged
/// children.
pub async fn handle_drop(
    tree: &mut TreeMaterializer,
    payload: DragPayload,
    target: DropTarget,
) -> AppResult<MoveOutcome> {
    match payload {
        DragPayload::Case {
            id,
            source_folder_id,
        } => {
            let DropTarget::Folder(target_folder) = target else {
                return Ok(MoveOutcome::Rejected {
                    reason: MoveRejection::CaseAtRoot,
                });
            };
            if source_folder_id == Some(target_folder) {
                return Ok(MoveOutcome::Noop);
            }

            tree.source().move_case(id, target_folder).await?;
            info!(case_id = %id, target = %target_folder, "Moved test case");

            tree.reload(source_folder_id).await?;
            tree.reload(Some(target_folder)).await?;
            Ok(MoveOutcome::Moved)
        }
        DragPayload::Folder {
            id,
            source_parent_id,
        } => {
            let new_parent = target.as_parent();
            if new_parent == source_parent_id {
                return Ok(MoveOutcome::Noop);
            }
            if let Some(reason) = folder_move_rejection(tree.source().as_ref(), id, new_parent).await? {
                return Ok(MoveOutcome::Rejected { reason });
            }

            tree.source().move_folder(id, new_parent).await?;
            info!(folder_id = %id, target = ?new_parent, "Moved folder");

            tree.reload(source_parent_id).await?;
            tree.reload(new_parent).await?;
            Ok(MoveOutcome::Moved)
        }
    }
}

/// Checks whether re-parenting `folder` under `new_parent` is illegal.
///
/// Walks upward from the target through `parent_of`, comparing each
/// ancestor to the moving folder. The walk ends at the root, at a missing
/// folder, or at [`MAX_ANCESTRY_HOPS`].
pub async fn folder_move_rejection(
    source: &dyn ChildSource,
    folder: FolderId,
    new_parent: Option<FolderId>,
) -> AppResult<Option<MoveRejection>> {
    let Some(target) = new_parent else {
        // Root is always a legal folder destination.
        return Ok(None);
    };
    if target == folder {
        return Ok(Some(MoveRejection::IntoSelf));
    }

    let mut current = target;
    for _ in 0..MAX_ANCESTRY_HOPS {
        match source.parent_of(current).await? {
            Some(parent) if parent == folder => {
                return Ok(Some(MoveRejection::IntoOwnDescendant));
            }
            Some(parent) => current = parent,
            None => return Ok(None),
        }
    }
    Ok(Some(MoveRejection::UnresolvableAncestry))
}
