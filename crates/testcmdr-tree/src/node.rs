//! Uniform tree node type merging folders and test cases.

use serde::{Deserialize, Serialize};

use testcmdr_core::types::FolderId;
use testcmdr_entity::folder::Folder;
use testcmdr_entity::testcase::TestCase;

/// A single entry in a materialized child list, tagged `folder` or `tc`
/// on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TreeNode {
    /// A child folder.
    #[serde(rename = "folder")]
    Folder(Folder),
    /// A child test case.
    #[serde(rename = "tc")]
    Case(TestCase),
}

impl TreeNode {
    /// Whether this node is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder(_))
    }

    /// The folder id, when this node is a folder.
    pub fn folder_id(&self) -> Option<FolderId> {
        match self {
            TreeNode::Folder(f) => Some(f.id),
            TreeNode::Case(_) => None,
        }
    }

    /// Display label: folder name, or the test case's tcid.
    pub fn label(&self) -> &str {
        match self {
            TreeNode::Folder(f) => &f.name,
            TreeNode::Case(c) => &c.tcid,
        }
    }
}

/// A node paired with its depth in a rendered traversal.
#[derive(Debug, Clone, Serialize)]
pub struct VisibleNode {
    /// Depth below the project root; root-level folders have depth 0.
    pub depth: usize,
    /// The node itself.
    #[serde(flatten)]
    pub node: TreeNode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use testcmdr_core::types::{OrganizationId, ProjectId};

    #[test]
    fn test_folder_node_serializes_with_type_tag() {
        let node = TreeNode::Folder(Folder {
            id: FolderId::new(),
            name: "Regression".to_string(),
            description: None,
            parent_folder_id: None,
            organization_id: OrganizationId::new(),
            project_id: ProjectId::new(),
            created_by: None,
            created_at: Utc::now(),
        });

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "folder");
        assert_eq!(json["name"], "Regression");
    }
}
