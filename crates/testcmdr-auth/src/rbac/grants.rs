//! Role grant rules for user invitation.
//!
//! An invitation carries a set of requested roles and a target organization.
//! Which roles an actor may grant depends solely on the actor's own roles,
//! and the target organization must be the actor's own unless the actor is
//! an application administrator.

use testcmdr_core::error::AppError;
use testcmdr_core::types::OrganizationId;
use testcmdr_entity::user::RoleTag;

/// Returns the set of roles the actor is allowed to grant to new users.
///
/// APP_ADMIN may grant any role. ORG_ADMIN may grant any role except
/// APP_ADMIN. Everyone else may grant nothing.
pub fn assignable_roles(actor_roles: &[RoleTag]) -> Vec<RoleTag> {
    if actor_roles.contains(&RoleTag::AppAdmin) {
        RoleTag::all().to_vec()
    } else if actor_roles.contains(&RoleTag::OrgAdmin) {
        RoleTag::all()
            .iter()
            .copied()
            .filter(|r| *r != RoleTag::AppAdmin)
            .collect()
    } else {
        Vec::new()
    }
}

/// Validates that an actor may issue an invitation with the requested roles
/// into the target organization.
///
/// Checked before any write: a non-APP_ADMIN actor can only invite into
/// their own organization, and only with roles from [`assignable_roles`].
pub fn validate_invitation(
    actor_roles: &[RoleTag],
    actor_org: Option<OrganizationId>,
    requested_roles: &[RoleTag],
    target_org: OrganizationId,
) -> Result<(), AppError> {
    if requested_roles.is_empty() {
        return Err(AppError::validation(
            "An invitation must carry at least one role",
        ));
    }

    let grantable = assignable_roles(actor_roles);
    if grantable.is_empty() {
        return Err(AppError::forbidden("Role does not permit inviting users"));
    }

    for role in requested_roles {
        if !grantable.contains(role) {
            return Err(AppError::forbidden(format!(
                "Role '{role}' cannot be granted by this account"
            )));
        }
    }

    if !actor_roles.contains(&RoleTag::AppAdmin) && actor_org != Some(target_org) {
        return Err(AppError::forbidden(
            "Invitations are limited to the actor's own organization",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use testcmdr_core::error::ErrorKind;

    #[test]
    fn test_org_admin_cannot_grant_app_admin() {
        let org = OrganizationId::new();
        let err = validate_invitation(
            &[RoleTag::OrgAdmin],
            Some(org),
            &[RoleTag::AppAdmin],
            org,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_org_admin_can_grant_other_roles_in_own_org() {
        let org = OrganizationId::new();
        assert!(
            validate_invitation(
                &[RoleTag::OrgAdmin],
                Some(org),
                &[RoleTag::TestEngineer, RoleTag::Analyst],
                org,
            )
            .is_ok()
        );
    }

    #[test]
    fn test_org_admin_cannot_invite_into_other_org() {
        let org_a = OrganizationId::new();
        let org_b = OrganizationId::new();
        let err = validate_invitation(
            &[RoleTag::OrgAdmin],
            Some(org_a),
            &[RoleTag::Analyst],
            org_b,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_app_admin_can_grant_anything_anywhere() {
        let org = OrganizationId::new();
        assert!(
            validate_invitation(
                &[RoleTag::AppAdmin],
                None,
                &[RoleTag::AppAdmin, RoleTag::OrgAdmin],
                org,
            )
            .is_ok()
        );
    }

    #[test]
    fn test_non_admin_cannot_invite_at_all() {
        let org = OrganizationId::new();
        let err = validate_invitation(
            &[RoleTag::ProjectManager, RoleTag::TestEngineer],
            Some(org),
            &[RoleTag::Analyst],
            org,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_empty_role_request_is_invalid() {
        let org = OrganizationId::new();
        let err =
            validate_invitation(&[RoleTag::AppAdmin], None, &[], org).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
