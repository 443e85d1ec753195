//! Test-type catalog entity models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use testcmdr_core::types::OrganizationId;

/// Lifecycle status of a global test-type entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "test_type_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeStatus {
    /// Selectable for new organizations.
    Active,
    /// Retired; kept for existing references only.
    Archived,
}

/// A global test-type catalog entry, keyed by its code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GlobalTestType {
    /// Stable catalog code (e.g. `FUNC`, `PERF`).
    pub code: String,
    /// Default display name.
    pub name: String,
    /// Taxonomy category.
    pub category: String,
    /// Default description.
    pub description: String,
    /// Icon descriptor (name of a client-side icon asset).
    pub icon: String,
    /// Lifecycle status.
    pub status: TypeStatus,
}

/// A per-organization enablement/override entry referencing a global code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrgTestType {
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// The referenced global catalog code.
    pub code: String,
    /// Whether this type is enabled for the organization.
    pub enabled: bool,
    /// Optional display-name override.
    pub name_override: Option<String>,
    /// Optional description override.
    pub description_override: Option<String>,
    /// Optional icon override.
    pub icon_override: Option<String>,
}
