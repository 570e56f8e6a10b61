//! Persistence for client records.
//!
//! # Store: `clients` table
//!
//! One row per client with a database-assigned UUID:
//!
//! - `id` - `UUID PRIMARY KEY DEFAULT gen_random_uuid()`
//! - `name`, `phone`, `address` - `TEXT`
//! - `loyalty_points` - `INTEGER`, never negative
//! - `created_at` - listing order
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p loyalty-cli -- migrate
//! ```
//!
//! Handlers never talk to a backend directly: they receive an
//! `Arc<dyn ClientStore>` through [`AppState`](crate::state::AppState).

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use loyalty_core::{Client, ClientId, ClientUpdate, NewClient};

pub use memory::MemoryClientStore;
pub use postgres::PgClientStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A loyalty balance cannot grow any further.
    #[error("loyalty points overflow for client {0}")]
    PointsOverflow(ClientId),
}

/// Storage operations on client records.
///
/// Lookups by identifier return `None`/`false` when no record matches, so
/// "not found" is never an error at this layer.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// All clients in creation order.
    async fn list(&self) -> Result<Vec<Client>, RepositoryError>;

    /// Insert a client; the store assigns the identifier.
    async fn create(&self, input: &NewClient) -> Result<Client, RepositoryError>;

    /// Fetch one client.
    async fn get(&self, id: ClientId) -> Result<Option<Client>, RepositoryError>;

    /// Overwrite the mutable fields of a client.
    ///
    /// Returns the stored record after the write, or `None` if no client has
    /// this identifier.
    async fn update(
        &self,
        id: ClientId,
        update: &ClientUpdate,
    ) -> Result<Option<Client>, RepositoryError>;

    /// Hard-delete a client. Returns `false` if nothing matched.
    async fn delete(&self, id: ClientId) -> Result<bool, RepositoryError>;

    /// Add exactly one point, atomically, and return the updated record.
    async fn increment_points(&self, id: ClientId) -> Result<Option<Client>, RepositoryError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
