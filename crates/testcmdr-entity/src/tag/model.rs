//! Tag entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use testcmdr_core::types::{OrganizationId, TagId};

/// An organization-scoped label applied to test cases.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Unique tag identifier.
    pub id: TagId,
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// Tag name.
    pub name: String,
    /// Display color (CSS hex, e.g. `#0ea5e9`).
    pub color: String,
    /// Soft-delete flag. Deleted tags stay referencable by snapshot.
    pub is_deleted: bool,
    /// When the tag was created.
    pub created_at: DateTime<Utc>,
}

/// Denormalized name/color copy stored on a test case at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSnapshot {
    /// Tag name at capture time.
    pub name: String,
    /// Tag color at capture time.
    pub color: String,
}

impl From<&Tag> for TagSnapshot {
    fn from(tag: &Tag) -> Self {
        Self {
            name: tag.name.clone(),
            color: tag.color.clone(),
        }
    }
}

/// Data for creating or updating a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertTag {
    /// Existing tag ID (None creates a new tag).
    pub id: Option<TagId>,
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// Tag name.
    pub name: String,
    /// Display color.
    pub color: String,
}
