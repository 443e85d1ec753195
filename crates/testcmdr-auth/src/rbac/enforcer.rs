//! RBAC enforcement logic — checks a role set against a required permission
//! and an organization scope.

use testcmdr_core::error::AppError;
use testcmdr_core::types::OrganizationId;
use testcmdr_entity::user::RoleTag;

use super::policies::{Permission, RbacPolicies};

/// Enforces role-based access control for protected operations.
///
/// Evaluated per request as a pure predicate over the session's role and
/// organization claims; nothing is cached between checks.
#[derive(Debug, Clone)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Checks whether the role set has the required permission.
    ///
    /// Returns `Ok(())` if allowed, or a Forbidden error if denied.
    pub fn require_permission(
        &self,
        roles: &[RoleTag],
        permission: Permission,
    ) -> Result<(), AppError> {
        if self.has_permission(roles, permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "None of the roles {roles:?} grants permission '{permission:?}'"
            )))
        }
    }

    /// Checks whether the role set has the required permission (returns bool).
    pub fn has_permission(&self, roles: &[RoleTag], permission: Permission) -> bool {
        self.policies.any_role_has(roles, permission)
    }

    /// Checks that an org-scoped operation targets the actor's own
    /// organization. APP_ADMIN bypasses the match entirely.
    pub fn require_org_access(
        &self,
        roles: &[RoleTag],
        actor_org: Option<OrganizationId>,
        target_org: OrganizationId,
    ) -> Result<(), AppError> {
        if roles.contains(&RoleTag::AppAdmin) {
            return Ok(());
        }
        if actor_org == Some(target_org) {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Operation targets a different organization",
            ))
        }
    }
}

impl Default for RbacEnforcer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_permission_denied_for_viewer_roles() {
        let enforcer = RbacEnforcer::new();
        let err = enforcer
            .require_permission(&[RoleTag::Analyst], Permission::UserInvite)
            .unwrap_err();
        assert_eq!(err.kind, testcmdr_core::error::ErrorKind::Forbidden);
    }

    #[test]
    fn test_org_access_requires_matching_org() {
        let enforcer = RbacEnforcer::new();
        let org_a = OrganizationId::new();
        let org_b = OrganizationId::new();

        assert!(
            enforcer
                .require_org_access(&[RoleTag::OrgAdmin], Some(org_a), org_a)
                .is_ok()
        );
        assert!(
            enforcer
                .require_org_access(&[RoleTag::OrgAdmin], Some(org_a), org_b)
                .is_err()
        );
        assert!(
            enforcer
                .require_org_access(&[RoleTag::OrgAdmin], None, org_b)
                .is_err()
        );
    }

    #[test]
    fn test_app_admin_bypasses_org_match() {
        let enforcer = RbacEnforcer::new();
        let target = OrganizationId::new();
        assert!(
            enforcer
                .require_org_access(&[RoleTag::AppAdmin], None, target)
                .is_ok()
        );
        assert!(
            enforcer
                .require_org_access(&[RoleTag::AppAdmin], Some(OrganizationId::new()), target)
                .is_ok()
        );
    }
}
