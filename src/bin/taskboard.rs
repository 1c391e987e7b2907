//! Entry point for the `taskboard` API server.
//!
//! ```text
//! taskboard --database-url <url> serve [--bind 127.0.0.1:8080]
//! taskboard --database-url <url> migrate
//! taskboard --database-url <url> create-user --email <email> --role <role> [--token <token>]
//! ```
//!
//! Logging is controlled by `RUST_LOG` and defaults to `info`.

use clap::Parser;
use mockable::DefaultClock;
use std::sync::Arc;
use taskboard::config::{Cli, Command, CreateUserArgs, ServerConfig};
use taskboard::db::{self, PgPool};
use taskboard::http::{self, AppState};
use taskboard::user::{
    adapters::postgres::PostgresUserRepository,
    services::{RegisterUserRequest, UserDirectory},
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let pool = db::connect(&cli.database).await?;

    match cli.command {
        Command::Serve(server) => serve(&pool, &server).await,
        Command::Migrate => db::apply_migrations(&pool).await.map_err(Into::into),
        Command::CreateUser(args) => create_user(&pool, args).await,
    }
}

async fn serve(pool: &PgPool, server: &ServerConfig) -> Result<(), BoxError> {
    db::apply_migrations(pool).await?;
    let listener = TcpListener::bind(server.bind).await?;
    http::serve(listener, AppState::postgres(pool), shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn create_user(pool: &PgPool, args: CreateUserArgs) -> Result<(), BoxError> {
    let CreateUserArgs { email, role, token } = args;
    let directory = UserDirectory::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    let mut request = RegisterUserRequest::new(email, role);
    if let Some(raw) = token {
        request = request.with_api_token(raw);
    }
    let user = directory.register(request).await?;
    tracing::info!(
        user_id = %user.id(),
        email = user.email().as_str(),
        role = user.role().as_str(),
        "user created"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown requested");
}
