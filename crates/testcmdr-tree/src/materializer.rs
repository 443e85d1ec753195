//! Lazy child loading and targeted reload.

use std::sync::Arc;

use tracing::debug;

use testcmdr_core::AppResult;
use testcmdr_core::types::FolderId;

use crate::cache::ChildrenCache;
use crate::node::TreeNode;
use crate::source::ChildSource;

/// Materializes a parent's immediate children on demand.
///
/// Child folders come first, sorted by name (case-insensitive), followed
/// by test cases sorted by tcid. At the project root only folders are
/// returned; unfiled test cases stay out of the tree.
pub struct TreeMaterializer {
    source: Arc<dyn ChildSource>,
    cache: ChildrenCache,
}

impl TreeMaterializer {
    /// Creates a materializer with an empty cache.
    pub fn new(source: Arc<dyn ChildSource>) -> Self {
        Self {
            source,
            cache: ChildrenCache::new(),
        }
    }

    /// The backing store handle.
    pub fn source(&self) -> Arc<dyn ChildSource> {
        Arc::clone(&self.source)
    }

    /// Read-only view of the cache.
    pub fn cache(&self) -> &ChildrenCache {
        &self.cache
    }

    /// Loads `parent`'s children into the cache unless already present.
    pub async fn ensure_loaded(&mut self, parent: Option<FolderId>) -> AppResult<()> {
        if !self.cache.contains(parent) {
            let nodes = self.fetch(parent).await?;
            self.cache.insert(parent, nodes);
        }
        Ok(())
    }

    /// The children of `parent`, loading them on first access.
    pub async fn children(&mut self, parent: Option<FolderId>) -> AppResult<Vec<TreeNode>> {
        self.ensure_loaded(parent).await?;
        Ok(self.cache.get(parent).map(<[_]>::to_vec).unwrap_or_default())
    }

    /// The cached children of `parent`, without loading.
    pub fn cached(&self, parent: Option<FolderId>) -> Option<&[TreeNode]> {
        self.cache.get(parent)
    }

    /// Re-fetches `parent`'s children, replacing the cache entry.
    pub async fn reload(&mut self, parent: Option<FolderId>) -> AppResult<Vec<TreeNode>> {
        let nodes = self.fetch(parent).await?;
        self.cache.insert(parent, nodes.clone());
        Ok(nodes)
    }

    /// Drops the cache entry for `parent`.
    pub fn invalidate(&mut self, parent: Option<FolderId>) {
        self.cache.invalidate(parent);
    }

    /// Drops cache entries for `folder` and everything cached below it.
    pub fn invalidate_subtree(&mut self, folder: FolderId) {
        self.cache.invalidate_subtree(folder);
    }

    async fn fetch(&self, parent: Option<FolderId>) -> AppResult<Vec<TreeNode>> {
        let mut folders = self.source.load_folders(parent).await?;
        folders.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let mut nodes: Vec<TreeNode> = folders.into_iter().map(TreeNode::Folder).collect();

        // Test cases are only merged in below a folder; root shows folders only.
        if let Some(folder) = parent {
            let mut cases = self.source.load_cases(folder).await?;
            cases.sort_by(|a, b| a.tcid.cmp(&b.tcid));
            nodes.extend(cases.into_iter().map(TreeNode::Case));
        }

        debug!(parent = ?parent, count = nodes.len(), "Materialized children");
        Ok(nodes)
    }
}

impl std::fmt::Debug for TreeMaterializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeMaterializer")
            .field("cache", &self.cache)
            .finish()
    }
}
