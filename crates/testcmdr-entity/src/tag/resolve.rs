//! Tag resolution for display.
//!
//! Consumers prefer the live organization tag list, but a tag referenced
//! by a test case may have been soft-deleted since the case was saved.
//! The case's `tags_snapshot` is the fallback for exactly that situation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use testcmdr_core::types::TagId;

use super::model::{Tag, TagSnapshot};
use crate::testcase::TestCase;

/// A tag reference resolved to displayable name/color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTag {
    /// The referenced tag ID.
    pub id: TagId,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// False when the value came from the snapshot rather than a live tag.
    pub live: bool,
}

/// Resolve a test case's tag references against the live tag map.
///
/// Soft-deleted live tags count as missing. References with neither a
/// live tag nor a snapshot entry are dropped.
pub fn resolve_tags(case: &TestCase, live: &HashMap<TagId, Tag>) -> Vec<ResolvedTag> {
    case.tags
        .iter()
        .filter_map(|id| {
            if let Some(tag) = live.get(id).filter(|t| !t.is_deleted) {
                return Some(ResolvedTag {
                    id: *id,
                    name: tag.name.clone(),
                    color: tag.color.clone(),
                    live: true,
                });
            }
            case.tags_snapshot.get(id).map(|snap: &TagSnapshot| ResolvedTag {
                id: *id,
                name: snap.name.clone(),
                color: snap.color.clone(),
                live: false,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use testcmdr_core::types::{OrganizationId, ProjectId, TestCaseId};

    fn case_with_tag(tag_id: TagId, snapshot: Option<TagSnapshot>) -> TestCase {
        let mut tags_snapshot = HashMap::new();
        if let Some(snap) = snapshot {
            tags_snapshot.insert(tag_id, snap);
        }
        TestCase {
            id: TestCaseId::new(),
            tcid: "TC-1".into(),
            name: "case".into(),
            description: String::new(),
            author: "author".into(),
            test_type: String::new(),
            test_type_code: None,
            priority: Default::default(),
            overall_result: Default::default(),
            prerequisites: String::new(),
            tags: vec![tag_id],
            tags_snapshot,
            steps: Vec::new(),
            folder_id: None,
            organization_id: OrganizationId::new(),
            project_id: ProjectId::new(),
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn live_tag(id: TagId, name: &str, deleted: bool) -> Tag {
        Tag {
            id,
            organization_id: OrganizationId::new(),
            name: name.into(),
            color: "#112233".into(),
            is_deleted: deleted,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_prefers_live_tag() {
        let id = TagId::new();
        let case = case_with_tag(
            id,
            Some(TagSnapshot {
                name: "stale".into(),
                color: "#000000".into(),
            }),
        );
        let live = HashMap::from([(id, live_tag(id, "current", false))]);

        let resolved = resolve_tags(&case, &live);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "current");
        assert!(resolved[0].live);
    }

    #[test]
    fn test_falls_back_to_snapshot_when_tag_deleted() {
        let id = TagId::new();
        let case = case_with_tag(
            id,
            Some(TagSnapshot {
                name: "UI".into(),
                color: "#0ea5e9".into(),
            }),
        );

        // Live tag list no longer contains the tag at all.
        let resolved = resolve_tags(&case, &HashMap::new());
        assert_eq!(
            resolved,
            vec![ResolvedTag {
                id,
                name: "UI".into(),
                color: "#0ea5e9".into(),
                live: false,
            }]
        );
    }

    #[test]
    fn test_soft_deleted_live_tag_counts_as_missing() {
        let id = TagId::new();
        let case = case_with_tag(
            id,
            Some(TagSnapshot {
                name: "UI".into(),
                color: "#0ea5e9".into(),
            }),
        );
        let live = HashMap::from([(id, live_tag(id, "UI-renamed", true))]);

        let resolved = resolve_tags(&case, &live);
        assert_eq!(resolved[0].name, "UI");
        assert!(!resolved[0].live);
    }

    #[test]
    fn test_unresolvable_reference_is_dropped() {
        let id = TagId::new();
        let case = case_with_tag(id, None);
        assert!(resolve_tags(&case, &HashMap::new()).is_empty());
    }
}
