//! Client resource JSON API.
//!
//! ```text
//! GET    /api/clients        - List all clients
//! POST   /api/clients        - Create a client (201)
//! GET    /api/clients/{id}   - Read one client
//! PUT    /api/clients/{id}   - Replace name/phone/address/loyaltyPoints
//! DELETE /api/clients/{id}   - Delete a client
//! PATCH  /api/clients/{id}   - Add one loyalty point
//! ```

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loyalty_core::{Client, ClientId, ClientUpdate, LoyaltyPoints, NewClient};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Build the client API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/clients", get(list).post(create))
        .route(
            "/api/clients/{id}",
            get(show).put(update).delete(destroy).patch(increment),
        )
}

/// Body accepted by create and update.
///
/// Every field is optional at the parsing stage so that missing values
/// produce a field-describing 400 instead of a generic rejection. A `name`
/// or `phone` holding only whitespace counts as missing.
///
/// `loyaltyPoints` must be a JSON integer; fractional numbers such as `3.0`
/// are rejected with a 400.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub loyalty_points: Option<i64>,
}

/// Fields of a payload that passed validation.
struct ValidPayload {
    name: String,
    phone: String,
    address: String,
    loyalty_points: Option<LoyaltyPoints>,
}

impl ClientPayload {
    fn validate(self) -> Result<ValidPayload> {
        let name = self.name.filter(|s| !s.trim().is_empty());
        let phone = self.phone.filter(|s| !s.trim().is_empty());
        let (Some(name), Some(phone)) = (name, phone) else {
            return Err(AppError::BadRequest("name and phone are required".to_string()));
        };

        let loyalty_points = self
            .loyalty_points
            .map(LoyaltyPoints::try_from)
            .transpose()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(ValidPayload {
            name,
            phone,
            address: self.address.unwrap_or_default(),
            loyalty_points,
        })
    }
}

/// Response for a successful delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// List all clients.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Client>>> {
    let clients = state.store().list().await?;
    Ok(Json(clients))
}

/// Create a client.
///
/// A missing, null or zero `loyaltyPoints` starts the balance at zero.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ClientPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Client>)> {
    let Json(payload) = payload?;
    let valid = payload.validate()?;

    let new_client = NewClient::new(valid.name, valid.phone)
        .with_address(valid.address)
        .with_points(valid.loyalty_points.unwrap_or_default());

    let client = state.store().create(&new_client).await?;
    add_breadcrumb("clients", "Created client", Some(&client.id.to_string()));
    tracing::info!(client_id = %client.id, "Client created");

    Ok((StatusCode::CREATED, Json(client)))
}

/// Read one client.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Client>> {
    let id = ClientId::parse(&id)?;
    let client = state
        .store()
        .get(id)
        .await?
        .ok_or_else(|| AppError::client_not_found(id))?;
    Ok(Json(client))
}

/// Replace a client's mutable fields.
///
/// The response echoes the submitted values rather than re-reading the
/// record. When `loyaltyPoints` is omitted the stored balance is kept and
/// reported.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ClientPayload>, JsonRejection>,
) -> Result<Json<Client>> {
    let id = ClientId::parse(&id)?;
    let Json(payload) = payload?;
    let valid = payload.validate()?;

    let update = ClientUpdate {
        name: valid.name,
        phone: valid.phone,
        address: valid.address,
        loyalty_points: valid.loyalty_points,
    };

    let stored = state
        .store()
        .update(id, &update)
        .await?
        .ok_or_else(|| AppError::client_not_found(id))?;
    add_breadcrumb("clients", "Updated client", Some(&id.to_string()));

    Ok(Json(Client {
        id,
        name: update.name,
        phone: update.phone,
        address: update.address,
        loyalty_points: update.loyalty_points.unwrap_or(stored.loyalty_points),
    }))
}

/// Delete a client.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = ClientId::parse(&id)?;
    if !state.store().delete(id).await? {
        return Err(AppError::client_not_found(id));
    }
    add_breadcrumb("clients", "Deleted client", Some(&id.to_string()));
    tracing::info!(client_id = %id, "Client deleted");

    Ok(Json(DeleteResponse { success: true }))
}

/// Add one loyalty point and return the stored record.
#[instrument(skip(state))]
pub async fn increment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Client>> {
    let id = ClientId::parse(&id)?;
    let client = state
        .store()
        .increment_points(id)
        .await?
        .ok_or_else(|| AppError::client_not_found(id))?;
    tracing::info!(
        client_id = %id,
        loyalty_points = client.loyalty_points.value(),
        reward_available = client.loyalty_points.reward_available(),
        "Loyalty point added"
    );

    Ok(Json(client))
}
