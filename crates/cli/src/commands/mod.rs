//! CLI command implementations.

pub mod clients;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

/// Connection pool size for one-off commands.
const CLI_MAX_CONNECTIONS: u32 = 2;

/// Errors shared by every command that talks to the database.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read the database URL, preferring `LOYALTY_DATABASE_URL`.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    ["LOYALTY_DATABASE_URL", "DATABASE_URL"]
        .into_iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .map(SecretString::from)
        .ok_or(CommandError::MissingEnvVar("LOYALTY_DATABASE_URL"))
}

/// Connect to the loyalty database.
pub async fn connect() -> Result<PgPool, CommandError> {
    let url = database_url()?;
    tracing::info!("Connecting to database...");
    let pool = loyalty_web::db::create_pool(&url, CLI_MAX_CONNECTIONS).await?;
    Ok(pool)
}
