//! Organization management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use testcmdr_core::error::AppError;
use testcmdr_database::repositories::organization::OrganizationRepository;
use testcmdr_entity::organization::CreateOrganization;

use crate::output::{self, OutputFormat};

/// Arguments for organization commands
#[derive(Debug, Args)]
pub struct OrgArgs {
    /// Organization subcommand
    #[command(subcommand)]
    pub command: OrgCommand,
}

/// Organization subcommands
#[derive(Debug, Subcommand)]
pub enum OrgCommand {
    /// List all organizations
    List,
    /// Create a new organization
    Create {
        /// Organization name
        name: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
}

/// Organization display row for table output
#[derive(Debug, Serialize, Tabled)]
struct OrgRow {
    /// Organization ID
    id: String,
    /// Name
    name: String,
    /// Description
    description: String,
    /// Created at
    created_at: String,
}

/// Execute organization commands
pub async fn execute(args: &OrgArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let org_repo = OrganizationRepository::new(pool);

    match &args.command {
        OrgCommand::List => {
            let orgs = org_repo.find_all().await?;
            let rows: Vec<OrgRow> = orgs
                .iter()
                .map(|o| OrgRow {
                    id: o.id.to_string(),
                    name: o.name.clone(),
                    description: o.description.clone().unwrap_or_default(),
                    created_at: o.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        OrgCommand::Create { name, description } => {
            if name.trim().is_empty() {
                return Err(AppError::validation("Organization name must not be empty"));
            }
            let org = org_repo
                .create(&CreateOrganization {
                    name: name.trim().to_string(),
                    description: description.clone(),
                    created_by: None,
                })
                .await?;
            output::print_success(&format!(
                "Organization '{}' created (id: {})",
                org.name, org.id
            ));
        }
    }

    Ok(())
}
