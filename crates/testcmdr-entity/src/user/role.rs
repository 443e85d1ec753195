//! Role tag enumeration.
//!
//! Roles are a closed set rather than free-form strings, so a typo in a
//! role name is a compile error and permission predicates can match
//! exhaustively. A user carries a *set* of role tags, not a single role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role tags available in the RBAC system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "role_tag", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleTag {
    /// Application-wide administrator; bypasses organization scoping.
    AppAdmin,
    /// Administrator within a single organization.
    OrgAdmin,
    /// Manages projects within an organization.
    ProjectManager,
    /// Read-and-report access to test cases.
    Analyst,
    /// Authors and executes test cases.
    TestEngineer,
    /// Tracks defects against test results.
    DefectCoordinator,
}

impl RoleTag {
    /// Return the role as its canonical uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppAdmin => "APP_ADMIN",
            Self::OrgAdmin => "ORG_ADMIN",
            Self::ProjectManager => "PROJECT_MANAGER",
            Self::Analyst => "ANALYST",
            Self::TestEngineer => "TEST_ENGINEER",
            Self::DefectCoordinator => "DEFECT_COORDINATOR",
        }
    }

    /// All role tags, in privilege order.
    pub fn all() -> [RoleTag; 6] {
        [
            Self::AppAdmin,
            Self::OrgAdmin,
            Self::ProjectManager,
            Self::Analyst,
            Self::TestEngineer,
            Self::DefectCoordinator,
        ]
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoleTag {
    type Err = testcmdr_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "APP_ADMIN" => Ok(Self::AppAdmin),
            "ORG_ADMIN" => Ok(Self::OrgAdmin),
            "PROJECT_MANAGER" => Ok(Self::ProjectManager),
            "ANALYST" => Ok(Self::Analyst),
            "TEST_ENGINEER" => Ok(Self::TestEngineer),
            "DEFECT_COORDINATOR" => Ok(Self::DefectCoordinator),
            _ => Err(testcmdr_core::AppError::validation(format!(
                "Invalid role tag: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("APP_ADMIN".parse::<RoleTag>().unwrap(), RoleTag::AppAdmin);
        assert_eq!(
            "test_engineer".parse::<RoleTag>().unwrap(),
            RoleTag::TestEngineer
        );
        assert!("SUPER_ADMIN".parse::<RoleTag>().is_err());
    }

    #[test]
    fn test_serde_uses_uppercase_tags() {
        let json = serde_json::to_string(&RoleTag::OrgAdmin).unwrap();
        assert_eq!(json, "\"ORG_ADMIN\"");
        let back: RoleTag = serde_json::from_str("\"DEFECT_COORDINATOR\"").unwrap();
        assert_eq!(back, RoleTag::DefectCoordinator);
    }
}
