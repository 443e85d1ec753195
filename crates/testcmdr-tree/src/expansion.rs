//! Expansion state and prefetch-driving traversals.

use std::collections::{HashSet, VecDeque};

use testcmdr_core::AppResult;
use testcmdr_core::types::FolderId;

use crate::filter::{FilterCriteria, passes_filters};
use crate::materializer::TreeMaterializer;
use crate::node::{TreeNode, VisibleNode};
use testcmdr_entity::testtype::ResolvedCatalog;

/// Tracks which folders are open and drives the traversal operations.
#[derive(Debug, Clone, Default)]
pub struct ExpansionController {
    expanded: HashSet<FolderId>,
}

impl ExpansionController {
    /// Creates a controller with everything collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `folder` is currently expanded.
    pub fn is_expanded(&self, folder: FolderId) -> bool {
        self.expanded.contains(&folder)
    }

    /// Flips a folder's expansion state. Expanding loads the folder's
    /// children if they are not cached yet. Returns the new state.
    pub async fn toggle(
        &mut self,
        tree: &mut TreeMaterializer,
        folder: FolderId,
    ) -> AppResult<bool> {
        if self.expanded.remove(&folder) {
            return Ok(false);
        }
        tree.ensure_loaded(Some(folder)).await?;
        self.expanded.insert(folder);
        Ok(true)
    }

    /// Expands `root` and, breadth-first, every folder below it, loading
    /// each level as it is visited.
    pub async fn expand_subtree(
        &mut self,
        tree: &mut TreeMaterializer,
        root: FolderId,
    ) -> AppResult<()> {
        let mut queue = VecDeque::from([root]);
        while let Some(folder) = queue.pop_front() {
            tree.ensure_loaded(Some(folder)).await?;
            self.expanded.insert(folder);
            if let Some(children) = tree.cached(Some(folder)) {
                queue.extend(children.iter().filter_map(TreeNode::folder_id));
            }
        }
        Ok(())
    }

    /// Expands every folder in the project, breadth-first from the root.
    pub async fn expand_all(&mut self, tree: &mut TreeMaterializer) -> AppResult<()> {
        tree.ensure_loaded(None).await?;
        let roots: Vec<FolderId> = tree
            .cached(None)
            .map(|nodes| nodes.iter().filter_map(TreeNode::folder_id).collect())
            .unwrap_or_default();
        for root in roots {
            self.expand_subtree(tree, root).await?;
        }
        Ok(())
    }

    /// Collapses everything. Cached children stay loaded.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expands every collapsed folder whose already-loaded children
    /// contain at least one test case passing the active criteria, so
    /// matches are not hidden behind a closed folder. A no-op when no
    /// criterion is active; never loads anything new.
    pub fn auto_expand_matches(
        &mut self,
        tree: &TreeMaterializer,
        criteria: &FilterCriteria,
        catalog: &ResolvedCatalog,
    ) {
        if !criteria.is_active() {
            return;
        }
        for (parent, children) in tree.cache().iter() {
            let Some(folder) = parent else { continue };
            if self.expanded.contains(&folder) {
                continue;
            }
            let has_match = children.iter().any(|node| match node {
                TreeNode::Case(tc) => passes_filters(tc, criteria, catalog),
                TreeNode::Folder(_) => false,
            });
            if has_match {
                self.expanded.insert(folder);
            }
        }
    }

    /// Depth-first render pass over the cached tree: folders always show,
    /// collapsed folders hide their subtree, and test-case leaves are
    /// dropped when they fail the active criteria.
    pub fn visible_nodes(
        &self,
        tree: &TreeMaterializer,
        criteria: &FilterCriteria,
        catalog: &ResolvedCatalog,
    ) -> Vec<VisibleNode> {
        let mut out = Vec::new();
        self.collect_visible(tree, None, 0, criteria, catalog, &mut out);
        out
    }

    fn collect_visible(
        &self,
        tree: &TreeMaterializer,
        parent: Option<FolderId>,
        depth: usize,
        criteria: &FilterCriteria,
        catalog: &ResolvedCatalog,
        out: &mut Vec<VisibleNode>,
    ) {
        let Some(children) = tree.cached(parent) else {
            return;
        };
        for node in children {
            match node {
                TreeNode::Folder(f) => {
                    out.push(VisibleNode {
                        depth,
                        node: node.clone(),
                    });
                    if self.expanded.contains(&f.id) {
                        self.collect_visible(tree, Some(f.id), depth + 1, criteria, catalog, out);
                    }
                }
                TreeNode::Case(tc) => {
                    if !criteria.is_active() || passes_filters(tc, criteria, catalog) {
                        out.push(VisibleNode {
                            depth,
                            node: node.clone(),
                        });
                    }
                }
            }
        }
    }
}
