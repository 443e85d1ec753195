//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use testcmdr_entity::user::RoleTag;

/// A protected operation, checked against the acting user's role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // Organization management
    /// Create organizations.
    OrganizationCreate,
    /// View organization details.
    OrganizationView,

    // Project management
    /// Create projects.
    ProjectCreate,
    /// View projects and their trees.
    ProjectView,

    // User management
    /// Invite new users.
    UserInvite,
    /// View user lists (admin pages).
    UserView,

    // Folder operations
    /// Create/rename/move/delete folders.
    FolderManage,

    // Test case operations
    /// Create/update/move/delete test cases.
    TestCaseManage,
    /// View test cases.
    TestCaseView,

    // Tag management
    /// Create/update/soft-delete organization tags.
    TagManage,

    // Test-type taxonomy
    /// Enable/disable and override org test types.
    TestTypeAdminister,
}

/// Defines the mapping from each role tag to its set of allowed permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → set of permissions.
    policies: HashMap<RoleTag, HashSet<Permission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        use Permission::*;

        let mut policies = HashMap::new();

        // App admin: everything, everywhere.
        policies.insert(
            RoleTag::AppAdmin,
            HashSet::from([
                OrganizationCreate,
                OrganizationView,
                ProjectCreate,
                ProjectView,
                UserInvite,
                UserView,
                FolderManage,
                TestCaseManage,
                TestCaseView,
                TagManage,
                TestTypeAdminister,
            ]),
        );

        // Org admin: full administration within the organization.
        policies.insert(
            RoleTag::OrgAdmin,
            HashSet::from([
                OrganizationView,
                ProjectCreate,
                ProjectView,
                UserInvite,
                UserView,
                FolderManage,
                TestCaseManage,
                TestCaseView,
                TagManage,
                TestTypeAdminister,
            ]),
        );

        // Project manager: project setup plus content management.
        policies.insert(
            RoleTag::ProjectManager,
            HashSet::from([
                OrganizationView,
                ProjectCreate,
                ProjectView,
                FolderManage,
                TestCaseManage,
                TestCaseView,
                TagManage,
            ]),
        );

        // Analyst: read and report.
        policies.insert(
            RoleTag::Analyst,
            HashSet::from([OrganizationView, ProjectView, TestCaseView]),
        );

        // Test engineer: authors and executes test cases.
        policies.insert(
            RoleTag::TestEngineer,
            HashSet::from([
                OrganizationView,
                ProjectView,
                FolderManage,
                TestCaseManage,
                TestCaseView,
            ]),
        );

        // Defect coordinator: tracks results, no authoring.
        policies.insert(
            RoleTag::DefectCoordinator,
            HashSet::from([OrganizationView, ProjectView, TestCaseView]),
        );

        Self { policies }
    }

    /// Checks whether any of the given role tags grants the permission.
    pub fn any_role_has(&self, roles: &[RoleTag], permission: Permission) -> bool {
        roles.iter().any(|role| {
            self.policies
                .get(role)
                .is_some_and(|perms| perms.contains(&permission))
        })
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_admin_has_everything() {
        let policies = RbacPolicies::new();
        let roles = [RoleTag::AppAdmin];
        assert!(policies.any_role_has(&roles, Permission::OrganizationCreate));
        assert!(policies.any_role_has(&roles, Permission::TestTypeAdminister));
    }

    #[test]
    fn test_analyst_cannot_manage_folders() {
        let policies = RbacPolicies::new();
        let roles = [RoleTag::Analyst];
        assert!(policies.any_role_has(&roles, Permission::TestCaseView));
        assert!(!policies.any_role_has(&roles, Permission::FolderManage));
    }

    #[test]
    fn test_any_role_in_set_grants() {
        let policies = RbacPolicies::new();
        let roles = [RoleTag::Analyst, RoleTag::TestEngineer];
        assert!(policies.any_role_has(&roles, Permission::FolderManage));
    }

    #[test]
    fn test_only_admins_invite_users() {
        let policies = RbacPolicies::new();
        for role in RoleTag::all() {
            let expected = matches!(role, RoleTag::AppAdmin | RoleTag::OrgAdmin);
            assert_eq!(
                policies.any_role_has(&[role], Permission::UserInvite),
                expected,
                "role {role}"
            );
        }
    }
}
