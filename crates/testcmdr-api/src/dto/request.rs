//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use testcmdr_core::AppResult;
use testcmdr_core::error::AppError;
use testcmdr_core::types::{FolderId, OrganizationId, TagId};
use testcmdr_entity::testcase::{Priority, RunStatus};
use testcmdr_entity::user::RoleTag;
use testcmdr_tree::{DragPayload, FilterCriteria};

/// Create organization request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    /// Organization name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Create project request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// Project name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// User invitation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InviteUserRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
    /// Target organization; absent only for cross-organization admins.
    pub organization_id: Option<OrganizationId>,
    /// Roles to grant.
    pub roles: Vec<RoleTag>,
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent folder (absent = root level).
    pub parent_folder_id: Option<FolderId>,
}

/// Folder rename request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// New folder name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// Folder move request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFolderRequest {
    /// New parent folder (absent = root).
    pub new_parent_id: Option<FolderId>,
}

/// Test case move request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveTestCaseRequest {
    /// Destination folder.
    pub folder_id: FolderId,
}

/// Drag-drop move request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveNodeRequest {
    /// What is being dragged.
    pub payload: DragPayload,
    /// Drop target folder (absent = project root).
    pub target_folder_id: Option<FolderId>,
}

/// Organization test-type enablement/override request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetOrgTestTypeRequest {
    /// Global catalog code.
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
    /// Whether the type is enabled for the organization.
    pub enabled: bool,
    /// Display name override.
    pub name_override: Option<String>,
    /// Description override.
    pub description_override: Option<String>,
    /// Icon override.
    pub icon_override: Option<String>,
}

/// Query parameters for listing children of a tree node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildrenQuery {
    /// Parent folder (absent = project root).
    pub parent_id: Option<FolderId>,
}

/// Query parameters for listing test cases by folder. An absent
/// `folder_id` explicitly queries the unfiled cases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseListQuery {
    /// Containing folder.
    pub folder_id: Option<FolderId>,
}

/// Query parameters for tag listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagListQuery {
    /// Include soft-deleted tags.
    #[serde(default)]
    pub include_deleted: bool,
}

/// Filter query parameters for whole-tree rendering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeFilterQuery {
    /// Substring search term.
    pub search: Option<String>,
    /// Overall result filter.
    pub status: Option<RunStatus>,
    /// Priority filter.
    pub priority: Option<Priority>,
    /// Resolved test-type name filter.
    pub test_type: Option<String>,
    /// Comma-separated tag ids.
    pub tags: Option<String>,
}

impl TreeFilterQuery {
    /// Converts the raw query into filter criteria.
    pub fn into_criteria(self) -> AppResult<FilterCriteria> {
        let tag_ids = match self.tags.as_deref() {
            None | Some("") => Vec::new(),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<TagId>()
                        .map_err(|_| AppError::validation(format!("Invalid tag id '{s}'")))
                })
                .collect::<AppResult<Vec<TagId>>>()?,
        };

        Ok(FilterCriteria {
            search_term: self.search.unwrap_or_default(),
            status: self.status,
            priority: self.priority,
            test_type: self.test_type,
            tag_ids,
        })
    }
}

/// Runs `validator` checks and converts failures to a validation error.
pub fn validate<T: Validate>(req: &T) -> AppResult<()> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}
