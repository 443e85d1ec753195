//! The storage seam the tree subsystem reads and writes through.

use async_trait::async_trait;

use testcmdr_core::AppResult;
use testcmdr_core::types::{FolderId, TestCaseId};
use testcmdr_entity::folder::Folder;
use testcmdr_entity::testcase::TestCase;

/// Backing store for one project's tree.
///
/// An implementation is scoped to a single (organization, project) pair;
/// ids passed in are assumed to belong to that project.
#[async_trait]
pub trait ChildSource: Send + Sync {
    /// Folders whose parent is `parent` (`None` = root-level folders).
    async fn load_folders(&self, parent: Option<FolderId>) -> AppResult<Vec<Folder>>;

    /// Test cases filed directly under `folder`. Unfiled test cases are
    /// never reachable through this call.
    async fn load_cases(&self, folder: FolderId) -> AppResult<Vec<TestCase>>;

    /// The parent of `folder`. Returns `Ok(None)` both for root-level
    /// folders and for ids that no longer exist, ending any ancestor walk.
    async fn parent_of(&self, folder: FolderId) -> AppResult<Option<FolderId>>;

    /// Reassigns a folder's parent (`None` = root).
    async fn move_folder(&self, folder: FolderId, new_parent: Option<FolderId>) -> AppResult<()>;

    /// Reassigns a test case's containing folder.
    async fn move_case(&self, case: TestCaseId, folder: FolderId) -> AppResult<()>;
}
