//! Integration tests for the loyalty card manager.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory store, no external services
//! cargo test -p loyalty-integration-tests
//!
//! # Postgres-backed tests
//! LOYALTY_TEST_DATABASE_URL=postgres://localhost/loyalty_test \
//!     cargo test -p loyalty-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_clients` - JSON API against a live listener
//! - `ui_flow` - HTML pages and form posts
//! - `postgres_store` - `PgClientStore` against a real database

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::Client;
use secrecy::SecretString;
use sqlx::PgPool;

use loyalty_web::AppState;
use loyalty_web::db::{ClientStore, MemoryClientStore, PgClientStore, create_pool};

/// Environment variable holding the Postgres test database URL.
pub const TEST_DATABASE_URL_VAR: &str = "LOYALTY_TEST_DATABASE_URL";

/// A running server bound to an ephemeral local port.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    pub store: Arc<dyn ClientStore>,
}

impl TestServer {
    /// Start a server over a fresh in-memory store.
    pub async fn memory() -> Self {
        Self::start(Arc::new(MemoryClientStore::new())).await
    }

    /// Start a server over the given store.
    pub async fn start(store: Arc<dyn ClientStore>) -> Self {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let app = loyalty_web::app(AppState::new(Arc::clone(&store), "Test Shop"));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
            store,
        }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Connect to the Postgres test database and apply migrations.
///
/// # Panics
///
/// Panics if the environment variable is unset or the database is unreachable.
pub async fn test_pool() -> PgPool {
    let url = std::env::var(TEST_DATABASE_URL_VAR)
        .unwrap_or_else(|_| panic!("{TEST_DATABASE_URL_VAR} must be set for Postgres tests"));

    let pool = create_pool(&SecretString::from(url), 5)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../web/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Postgres-backed store for the test database.
pub async fn postgres_store() -> PgClientStore {
    PgClientStore::new(test_pool().await)
}

/// Unique suffix so concurrent tests never collide on names.
#[must_use]
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
