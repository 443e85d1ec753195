//! Per-parent children cache.
//!
//! A flat arena keyed by parent folder id (`None` = project root). Entries
//! are replaced wholesale by targeted reload; there is no eviction.

use std::collections::HashMap;

use testcmdr_core::types::FolderId;

use crate::node::TreeNode;

/// Cached child lists, one entry per loaded parent.
#[derive(Debug, Clone, Default)]
pub struct ChildrenCache {
    entries: HashMap<Option<FolderId>, Vec<TreeNode>>,
}

impl ChildrenCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached children of `parent`, if loaded.
    pub fn get(&self, parent: Option<FolderId>) -> Option<&[TreeNode]> {
        self.entries.get(&parent).map(Vec::as_slice)
    }

    /// Whether `parent` has a cached entry.
    pub fn contains(&self, parent: Option<FolderId>) -> bool {
        self.entries.contains_key(&parent)
    }

    /// Replaces the entry for `parent`.
    pub fn insert(&mut self, parent: Option<FolderId>, children: Vec<TreeNode>) {
        self.entries.insert(parent, children);
    }

    /// Drops the entry for `parent`, forcing the next read to re-fetch.
    pub fn invalidate(&mut self, parent: Option<FolderId>) {
        self.entries.remove(&parent);
    }

    /// Drops the entry for `folder` and, transitively, every cached entry
    /// of a folder reachable below it through cached child lists.
    pub fn invalidate_subtree(&mut self, folder: FolderId) {
        let mut stack = vec![folder];
        while let Some(id) = stack.pop() {
            if let Some(children) = self.entries.remove(&Some(id)) {
                stack.extend(children.iter().filter_map(TreeNode::folder_id));
            }
        }
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over loaded entries.
    pub fn iter(&self) -> impl Iterator<Item = (Option<FolderId>, &[TreeNode])> {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Number of loaded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use testcmdr_core::types::{OrganizationId, ProjectId};
    use testcmdr_entity::folder::Folder;

    fn folder_node(id: FolderId, parent: Option<FolderId>) -> TreeNode {
        TreeNode::Folder(Folder {
            id,
            name: "f".to_string(),
            description: None,
            parent_folder_id: parent,
            organization_id: OrganizationId::new(),
            project_id: ProjectId::new(),
            created_by: None,
            created_at: Utc::now(),
        })
    }

    #[test]
    fn test_invalidate_subtree_cascades_through_cached_entries() {
        let a = FolderId::new();
        let b = FolderId::new();
        let c = FolderId::new();

        let mut cache = ChildrenCache::new();
        cache.insert(None, vec![folder_node(a, None)]);
        cache.insert(Some(a), vec![folder_node(b, Some(a))]);
        cache.insert(Some(b), vec![folder_node(c, Some(b))]);
        cache.insert(Some(c), vec![]);

        cache.invalidate_subtree(a);

        assert!(cache.contains(None));
        assert!(!cache.contains(Some(a)));
        assert!(!cache.contains(Some(b)));
        assert!(!cache.contains(Some(c)));
    }

    #[test]
    fn test_invalidate_is_targeted() {
        let a = FolderId::new();
        let mut cache = ChildrenCache::new();
        cache.insert(None, vec![]);
        cache.insert(Some(a), vec![]);

        cache.invalidate(Some(a));
        assert!(cache.contains(None));
        assert!(!cache.contains(Some(a)));
    }
}
