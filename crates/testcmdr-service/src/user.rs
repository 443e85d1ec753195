//! User listing and invitation.
//!
//! Accounts live in the external identity provider; this service manages
//! the profile records and enforces invitation rules server-side so a
//! tampered client cannot mint roles it is not allowed to grant.

use std::sync::Arc;

use tracing::info;

use testcmdr_auth::rbac::grants;
use testcmdr_auth::{Permission, RbacEnforcer};
use testcmdr_core::AppResult;
use testcmdr_core::error::AppError;
use testcmdr_core::types::{OrganizationId, UserId};
use testcmdr_database::repositories::user::UserRepository;
use testcmdr_entity::user::{CreateUser, RoleTag, User};

use crate::context::RequestContext;

/// Manages user profiles and invitations.
pub struct UserService {
    user_repo: Arc<UserRepository>,
    enforcer: Arc<RbacEnforcer>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>, enforcer: Arc<RbacEnforcer>) -> Self {
        Self {
            user_repo,
            enforcer,
        }
    }

    /// Gets a user by ID.
    pub async fn get_user(&self, ctx: &RequestContext, id: UserId) -> AppResult<User> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::UserView)?;
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        if let Some(org) = user.organization_id {
            self.enforcer
                .require_org_access(&ctx.roles, ctx.organization_id, org)?;
        } else if !ctx.is_app_admin() {
            return Err(AppError::forbidden(
                "Only application administrators can view unscoped accounts",
            ));
        }
        Ok(user)
    }

    /// Lists an organization's users.
    pub async fn list_by_org(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<User>> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::UserView)?;
        self.enforcer
            .require_org_access(&ctx.roles, ctx.organization_id, organization_id)?;
        self.user_repo.find_by_org(organization_id).await
    }

    /// Invites a user: validates the caller's grant rights against the
    /// requested roles and target organization, then writes the profile.
    /// Nothing is written when validation fails.
    pub async fn invite_user(&self, ctx: &RequestContext, data: CreateUser) -> AppResult<User> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::UserInvite)?;

        let email = data.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }
        if data.display_name.trim().is_empty() {
            return Err(AppError::validation("Display name cannot be empty"));
        }

        match data.organization_id {
            Some(target) => {
                grants::validate_invitation(&ctx.roles, ctx.organization_id, &data.roles, target)?;
            }
            None => {
                // Unscoped accounts are APP_ADMIN territory only.
                if !ctx.is_app_admin() {
                    return Err(AppError::forbidden(
                        "Only application administrators can create unscoped accounts",
                    ));
                }
                if data.roles.is_empty() {
                    return Err(AppError::validation(
                        "An invitation must carry at least one role",
                    ));
                }
            }
        }

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(format!(
                "A user with email '{email}' already exists"
            )));
        }

        let user = self
            .user_repo
            .create(&CreateUser {
                email,
                display_name: data.display_name.trim().to_string(),
                organization_id: data.organization_id,
                roles: data.roles,
                created_by: Some(ctx.user_id),
            })
            .await?;
        info!(
            user_id = %user.id,
            email = %user.email,
            roles = ?user.roles,
            invited_by = %ctx.user_id,
            "Invited user"
        );
        Ok(user)
    }

    /// The roles the acting user may grant in invitations, for form
    /// population.
    pub fn assignable_roles(&self, ctx: &RequestContext) -> Vec<RoleTag> {
        grants::assignable_roles(&ctx.roles)
    }
}
