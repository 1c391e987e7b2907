//! Command-line and environment configuration for the `taskboard` binary.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;

/// Default pool size when neither `--pool-size` nor `TASKBOARD_POOL_SIZE` is
/// set.
pub const DEFAULT_POOL_SIZE: u32 = 8;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "taskboard")]
#[command(version, about = "Pipelines, stages and tasks over a JSON API")]
pub struct Cli {
    /// Database connection settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Database connection settings.
#[derive(Clone, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum number of pooled connections.
    #[arg(long, env = "TASKBOARD_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("database_url", &"..")
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "TASKBOARD_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,
}

/// Subcommands of the `taskboard` binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply migrations, then serve the API
    Serve(ServerConfig),
    /// Apply the schema migration and exit
    Migrate,
    /// Register a user who can call the API
    CreateUser(CreateUserArgs),
}

/// Arguments of the `create-user` subcommand.
#[derive(Clone, Args)]
pub struct CreateUserArgs {
    /// Email address of the new user.
    #[arg(long)]
    pub email: String,

    /// Role: admin, manager or member.
    #[arg(long)]
    pub role: String,

    /// Raw API token to issue; only its digest is stored.
    #[arg(long)]
    pub token: Option<String>,
}

impl std::fmt::Debug for CreateUserArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserArgs")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("token", &self.token.as_ref().map(|_| ".."))
            .finish()
    }
}
