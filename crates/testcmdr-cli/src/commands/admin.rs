//! Application administrator management commands.

use clap::{Args, Subcommand};

use testcmdr_auth::jwt::JwtEncoder;
use testcmdr_core::error::AppError;
use testcmdr_database::repositories::user::UserRepository;
use testcmdr_entity::user::{CreateUser, RoleTag};

use crate::output;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create the initial application administrator
    Seed {
        /// Email address (will prompt if not provided)
        #[arg(short, long)]
        email: Option<String>,
        /// Display name (will prompt if not provided)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Mint a bootstrap access token for an existing user
    Token {
        /// Email address of the user
        #[arg(short, long)]
        email: String,
        /// Token lifetime in seconds
        #[arg(long, default_value_t = 3600)]
        ttl: i64,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let user_repo = UserRepository::new(pool.clone());

    match &args.command {
        AdminCommand::Seed { email, name } => {
            let email = match email {
                Some(e) => e.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Admin email")
                    .interact_text()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };
            let email = email.trim().to_lowercase();

            let name = match name {
                Some(n) => n.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Admin display name")
                    .interact_text()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };

            if user_repo.find_by_email(&email).await?.is_some() {
                return Err(AppError::conflict(format!(
                    "A user with email '{}' already exists",
                    email
                )));
            }

            let confirmed = dialoguer::Confirm::new()
                .with_prompt(format!("Create application admin '{}' <{}>?", name, email))
                .default(true)
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
            if !confirmed {
                output::print_warning("Aborted.");
                return Ok(());
            }

            let user = user_repo
                .create(&CreateUser {
                    email,
                    display_name: name.trim().to_string(),
                    organization_id: None,
                    roles: vec![RoleTag::AppAdmin],
                    created_by: None,
                })
                .await?;

            output::print_success(&format!(
                "Application admin '{}' created (id: {})",
                user.display_name, user.id
            ));
        }
        AdminCommand::Token { email, ttl } => {
            let user = user_repo
                .find_by_email(&email.trim().to_lowercase())
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{}' not found", email)))?;

            let encoder = JwtEncoder::new(&config.auth);
            let token = encoder.encode(
                user.id,
                user.organization_id,
                user.roles.clone(),
                &user.display_name,
                &user.email,
                *ttl,
            )?;

            println!("{}", token);
        }
    }

    Ok(())
}
