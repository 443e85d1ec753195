//! Test case entity model.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use testcmdr_core::types::{FolderId, OrganizationId, ProjectId, TagId, TestCaseId, UserId};

use super::status::{Priority, RunStatus};
use super::step::TestStep;
use crate::tag::model::TagSnapshot;

/// A named, stepped test specification with status, priority, and tags.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestCase {
    /// System-assigned identifier, unique within the project.
    pub id: TestCaseId,
    /// User-visible display identifier (e.g. `TC-LOGIN-01`); uniqueness
    /// within the project is enforced server-side.
    pub tcid: String,
    /// Test case name.
    pub name: String,
    /// Rich-text (HTML) description.
    pub description: String,
    /// Author display name. A label, not a user reference.
    pub author: String,
    /// Free test-type label, kept for cases predating the catalog.
    pub test_type: String,
    /// Reference into the resolved test-type catalog.
    pub test_type_code: Option<String>,
    /// Priority (defaults to Medium when absent).
    #[serde(default)]
    pub priority: Priority,
    /// Overall execution result (defaults to Not Run when absent).
    #[serde(default)]
    pub overall_result: RunStatus,
    /// Free-text prerequisites.
    #[serde(default)]
    pub prerequisites: String,
    /// Referenced tag identifiers.
    #[serde(default)]
    pub tags: Vec<TagId>,
    /// Denormalized tag name/color captured at save time; the fallback
    /// when a referenced tag is later deleted.
    #[serde(default)]
    #[sqlx(json)]
    pub tags_snapshot: HashMap<TagId, TagSnapshot>,
    /// Ordered test steps. Step numbers are contiguous 1..N.
    #[serde(default)]
    #[sqlx(json)]
    pub steps: Vec<TestStep>,
    /// Containing folder. A test case with no folder is only visible when
    /// root contents are queried explicitly.
    pub folder_id: Option<FolderId>,
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// The owning project.
    pub project_id: ProjectId,
    /// The user who created the test case.
    pub created_by: Option<UserId>,
    /// When the test case was created.
    pub created_at: DateTime<Utc>,
    /// When the test case was last updated.
    pub updated_at: DateTime<Utc>,
}

impl TestCase {
    /// Append a step and renumber.
    pub fn add_step(&mut self, step: TestStep) {
        self.steps.push(step);
        self.renumber_steps();
    }

    /// Insert a step at a 1-based position (clamped to the end) and renumber.
    pub fn insert_step(&mut self, position: u32, step: TestStep) {
        let index = (position.saturating_sub(1) as usize).min(self.steps.len());
        self.steps.insert(index, step);
        self.renumber_steps();
    }

    /// Remove the step with the given number, renumbering the remainder.
    /// Returns the removed step, if any.
    pub fn remove_step(&mut self, step_number: u32) -> Option<TestStep> {
        let index = self
            .steps
            .iter()
            .position(|s| s.step_number == step_number)?;
        let removed = self.steps.remove(index);
        self.renumber_steps();
        Some(removed)
    }

    /// Restore the step-number invariant: contiguous 1..N matching
    /// array position.
    pub fn renumber_steps(&mut self) {
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.step_number = (i + 1) as u32;
        }
    }

    /// Capture the current tag list into the snapshot map.
    pub fn snapshot_tags<'a>(&mut self, resolve: impl Fn(&TagId) -> Option<&'a TagSnapshot>) {
        self.tags_snapshot = self
            .tags
            .iter()
            .filter_map(|id| resolve(id).map(|snap| (*id, snap.clone())))
            .collect();
    }
}

/// Data required to create a new test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTestCase {
    /// User-visible display identifier.
    pub tcid: String,
    /// Test case name.
    pub name: String,
    /// Rich-text (HTML) description.
    pub description: String,
    /// Author display name.
    pub author: String,
    /// Free test-type label.
    #[serde(default)]
    pub test_type: String,
    /// Reference into the test-type catalog.
    pub test_type_code: Option<String>,
    /// Priority.
    #[serde(default)]
    pub priority: Priority,
    /// Prerequisites.
    #[serde(default)]
    pub prerequisites: String,
    /// Referenced tag identifiers.
    #[serde(default)]
    pub tags: Vec<TagId>,
    /// Tag snapshot captured at save time.
    #[serde(default)]
    pub tags_snapshot: HashMap<TagId, TagSnapshot>,
    /// Ordered test steps.
    #[serde(default)]
    pub steps: Vec<TestStep>,
    /// Containing folder.
    pub folder_id: Option<FolderId>,
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// The owning project.
    pub project_id: ProjectId,
    /// The creating user's ID.
    pub created_by: Option<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_with_steps(descriptions: &[&str]) -> TestCase {
        let mut tc = TestCase {
            id: TestCaseId::new(),
            tcid: "TC-1".into(),
            name: "case".into(),
            description: String::new(),
            author: "author".into(),
            test_type: String::new(),
            test_type_code: None,
            priority: Priority::default(),
            overall_result: RunStatus::default(),
            prerequisites: String::new(),
            tags: Vec::new(),
            tags_snapshot: HashMap::new(),
            steps: Vec::new(),
            folder_id: None,
            organization_id: OrganizationId::new(),
            project_id: ProjectId::new(),
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        for d in descriptions {
            tc.add_step(TestStep::new(*d));
        }
        tc
    }

    #[test]
    fn test_add_step_numbers_contiguously() {
        let tc = case_with_steps(&["a", "b", "c", "d"]);
        let numbers: Vec<u32> = tc.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_remove_step_renumbers_and_shifts_content() {
        let mut tc = case_with_steps(&["a", "b", "c", "d"]);
        let removed = tc.remove_step(2).unwrap();
        assert_eq!(removed.description, "b");

        let numbers: Vec<u32> = tc.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(tc.steps[1].description, "c");
        assert_eq!(tc.steps[2].description, "d");
    }

    #[test]
    fn test_remove_missing_step_is_noop() {
        let mut tc = case_with_steps(&["a"]);
        assert!(tc.remove_step(9).is_none());
        assert_eq!(tc.steps.len(), 1);
        assert_eq!(tc.steps[0].step_number, 1);
    }

    #[test]
    fn test_insert_step_clamps_position() {
        let mut tc = case_with_steps(&["a", "b"]);
        tc.insert_step(99, TestStep::new("tail"));
        assert_eq!(tc.steps[2].description, "tail");
        assert_eq!(tc.steps[2].step_number, 3);
    }

    #[test]
    fn test_deserialize_applies_status_defaults() {
        let json = serde_json::json!({
            "id": TestCaseId::new(),
            "tcid": "TC-2",
            "name": "minimal",
            "description": "",
            "author": "a",
            "test_type": "",
            "test_type_code": null,
            "folder_id": null,
            "organization_id": OrganizationId::new(),
            "project_id": ProjectId::new(),
            "created_by": null,
            "created_at": Utc::now(),
            "updated_at": Utc::now(),
        });
        let tc: TestCase = serde_json::from_value(json).unwrap();
        assert_eq!(tc.priority, Priority::Medium);
        assert_eq!(tc.overall_result, RunStatus::NotRun);
    }
}
