//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod org;
pub mod test_type;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use testcmdr_core::error::AppError;

/// Test Commander — test-case management administration
#[derive(Debug, Parser)]
#[command(name = "testcmdr", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (reads config/default.toml plus config/<env>.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Application administrator management
    Admin(admin::AdminArgs),
    /// Organization management
    Org(org::OrgArgs),
    /// Global test-type catalog maintenance
    TestType(test_type::TestTypeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::Admin(args) => admin::execute(args, &self.env).await,
            Commands::Org(args) => org::execute(args, &self.env, self.format).await,
            Commands::TestType(args) => test_type::execute(args, &self.env, self.format).await,
        }
    }
}

/// Helper: load configuration for the given environment
pub fn load_config(env: &str) -> Result<testcmdr_core::config::AppConfig, AppError> {
    testcmdr_core::config::AppConfig::load(env)
}

/// Helper: create database pool from config
pub async fn create_db_pool(
    config: &testcmdr_core::config::AppConfig,
) -> Result<sqlx::PgPool, AppError> {
    testcmdr_database::connection::create_pool(&config.database).await
}
