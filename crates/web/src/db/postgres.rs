//! `PostgreSQL` client store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use loyalty_core::{Client, ClientId, ClientUpdate, LoyaltyPoints, NewClient};

use super::{ClientStore, RepositoryError};

/// SQLSTATE raised when an integer column overflows.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` client queries.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    name: String,
    phone: String,
    address: String,
    loyalty_points: i32,
}

impl TryFrom<ClientRow> for Client {
    type Error = RepositoryError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let loyalty_points = LoyaltyPoints::try_from(row.loyalty_points).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid loyalty points in database: {e}"))
        })?;

        Ok(Self {
            id: ClientId::new(row.id),
            name: row.name,
            phone: row.phone,
            address: row.address,
            loyalty_points,
        })
    }
}

// =============================================================================
// Store
// =============================================================================

/// Client store backed by a shared `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgClientStore {
    pool: PgPool,
}

impl PgClientStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn list(&self) -> Result<Vec<Client>, RepositoryError> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r"
            SELECT id, name, phone, address, loyalty_points
            FROM clients
            ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn create(&self, input: &NewClient) -> Result<Client, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            INSERT INTO clients (name, phone, address, loyalty_points)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, phone, address, loyalty_points
            ",
        )
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(i32::from(input.loyalty_points))
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            SELECT id, name, phone, address, loyalty_points
            FROM clients
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(
        &self,
        id: ClientId,
        update: &ClientUpdate,
    ) -> Result<Option<Client>, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            UPDATE clients
            SET name = $2,
                phone = $3,
                address = $4,
                loyalty_points = COALESCE($5, loyalty_points)
            WHERE id = $1
            RETURNING id, name, phone, address, loyalty_points
            ",
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.phone)
        .bind(&update.address)
        .bind(update.loyalty_points.map(i32::from))
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete(&self, id: ClientId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_points(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        // Single statement: concurrent increments serialize on the row lock.
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            UPDATE clients
            SET loyalty_points = loyalty_points + 1
            WHERE id = $1
            RETURNING id, name, phone, address, loyalty_points
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            let overflow = e
                .as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == NUMERIC_VALUE_OUT_OF_RANGE);
            if overflow {
                RepositoryError::PointsOverflow(id)
            } else {
                RepositoryError::Database(e)
            }
        })?;

        row.map(TryInto::try_into).transpose()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
