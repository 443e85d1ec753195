//! Global test-type catalog maintenance commands.
//!
//! Renames here touch the global catalog shared by every organization,
//! so they live in the CLI rather than behind the HTTP API.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use testcmdr_core::error::AppError;
use testcmdr_database::repositories::test_type::TestTypeRepository;

use crate::output::{self, OutputFormat};

/// Arguments for test-type commands
#[derive(Debug, Args)]
pub struct TestTypeArgs {
    /// Test-type subcommand
    #[command(subcommand)]
    pub command: TestTypeCommand,
}

/// Test-type subcommands
#[derive(Debug, Subcommand)]
pub enum TestTypeCommand {
    /// List the global test-type catalog
    List,
    /// Rename a global test type
    Rename {
        /// Catalog code (e.g. FUNC, PERF)
        code: String,
        /// New display name
        name: String,
    },
}

/// Test-type display row for table output
#[derive(Debug, Serialize, Tabled)]
struct TypeRow {
    /// Catalog code
    code: String,
    /// Display name
    name: String,
    /// Category
    category: String,
    /// Lifecycle status
    status: String,
}

/// Execute test-type commands
pub async fn execute(
    args: &TestTypeArgs,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let type_repo = TestTypeRepository::new(pool);

    match &args.command {
        TestTypeCommand::List => {
            let types = type_repo.find_globals().await?;
            let rows: Vec<TypeRow> = types
                .iter()
                .map(|t| TypeRow {
                    code: t.code.clone(),
                    name: t.name.clone(),
                    category: t.category.clone(),
                    status: format!("{:?}", t.status),
                })
                .collect();
            output::print_list(&rows, format);
        }
        TestTypeCommand::Rename { code, name } => {
            if name.trim().is_empty() {
                return Err(AppError::validation("Display name must not be empty"));
            }
            let updated = type_repo.rename_global(code, name.trim()).await?;
            output::print_success(&format!(
                "Test type '{}' renamed to '{}'",
                updated.code, updated.name
            ));
            output::print_warning(
                "Running servers refresh resolved catalogs lazily; restart them to pick up the new name immediately.",
            );
        }
    }

    Ok(())
}
