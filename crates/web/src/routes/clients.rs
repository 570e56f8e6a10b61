//! Client management pages.
//!
//! Every mutation follows post/redirect/get: the handler writes to the store
//! and redirects, so the next page always shows the stored state. Store
//! failures are logged and send the user back to the client list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use loyalty_core::{Client, ClientForm, ClientId, FormErrors, LoyaltyPoints, filter_clients};

use crate::error::add_breadcrumb;
use crate::filters;
use crate::state::AppState;

// =============================================================================
// Query Parameters
// =============================================================================

/// Client list query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Free-text search over name, phone and address.
    #[serde(default)]
    pub q: String,
}

// =============================================================================
// View Models
// =============================================================================

/// One row of the client list.
#[derive(Debug, Clone)]
pub struct ClientRowView {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub points: u32,
    pub reward_available: bool,
}

impl From<&Client> for ClientRowView {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.to_string(),
            name: client.name.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            points: client.loyalty_points.value(),
            reward_available: client.loyalty_points.reward_available(),
        }
    }
}

/// Add/edit form contents with inline errors.
#[derive(Debug, Clone, Default)]
pub struct FormView {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub name_error: Option<String>,
    pub phone_error: Option<String>,
}

impl FormView {
    fn new(form: ClientForm, errors: FormErrors) -> Self {
        Self {
            name: form.name,
            phone: form.phone,
            address: form.address.unwrap_or_default(),
            name_error: errors.name,
            phone_error: errors.phone,
        }
    }
}

/// A single slot on the stamp card.
#[derive(Debug, Clone, Copy)]
pub struct StampView {
    pub number: u32,
    pub filled: bool,
}

/// Build the stamp row for a balance.
fn stamps_for(points: LoyaltyPoints) -> Vec<StampView> {
    let filled = points.stamps();
    (1..=LoyaltyPoints::REWARD_THRESHOLD)
        .map(|number| StampView {
            number,
            filled: number <= filled,
        })
        .collect()
}

// =============================================================================
// Templates
// =============================================================================

/// Client list page.
#[derive(Template, WebTemplate)]
#[template(path = "clients/index.html")]
pub struct ClientsIndexTemplate {
    pub shop_name: String,
    pub clients: Vec<ClientRowView>,
    pub query: String,
    pub total: usize,
}

/// Add or edit client form.
#[derive(Template, WebTemplate)]
#[template(path = "clients/form.html")]
pub struct ClientFormTemplate {
    pub shop_name: String,
    pub title: String,
    pub action: String,
    pub submit_label: String,
    pub form: FormView,
}

/// Loyalty card page.
#[derive(Template, WebTemplate)]
#[template(path = "clients/card.html")]
pub struct ClientCardTemplate {
    pub shop_name: String,
    pub client: ClientRowView,
    pub stamps: Vec<StampView>,
    pub rewards_earned: u32,
    pub can_add_point: bool,
}

fn add_form(state: &AppState, form: FormView) -> ClientFormTemplate {
    ClientFormTemplate {
        shop_name: state.shop_name().to_string(),
        title: "Add client".to_string(),
        action: "/clients".to_string(),
        submit_label: "Add".to_string(),
        form,
    }
}

fn edit_form(state: &AppState, id: ClientId, form: FormView) -> ClientFormTemplate {
    ClientFormTemplate {
        shop_name: state.shop_name().to_string(),
        title: "Edit client".to_string(),
        action: format!("/clients/{id}"),
        submit_label: "Save".to_string(),
        form,
    }
}

/// Parse a path id, logging malformed values.
fn parse_id(raw: &str) -> Option<ClientId> {
    match ClientId::parse(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(error = %e, id = raw, "Malformed client id in page route");
            None
        }
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Client list with search.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let clients = match state.store().list().await {
        Ok(clients) => clients,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list clients");
            Vec::new()
        }
    };

    let rows = filter_clients(&clients, &query.q)
        .into_iter()
        .map(ClientRowView::from)
        .collect();

    ClientsIndexTemplate {
        shop_name: state.shop_name().to_string(),
        clients: rows,
        query: query.q,
        total: clients.len(),
    }
    .into_response()
}

/// Empty add-client form.
#[instrument(skip(state))]
pub async fn new_client(State(state): State<AppState>) -> Response {
    add_form(&state, FormView::default()).into_response()
}

/// Create a client from the add form.
#[instrument(skip(state, form))]
pub async fn create(State(state): State<AppState>, Form(form): Form<ClientForm>) -> Response {
    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                add_form(&state, FormView::new(form, errors)),
            )
                .into_response();
        }
    };

    match state.store().create(&valid.into_new_client()).await {
        Ok(client) => {
            add_breadcrumb("clients", "Created client", Some(&client.id.to_string()));
            tracing::info!(client_id = %client.id, "Client created");
        }
        Err(e) => tracing::error!(error = %e, "Failed to create client"),
    }
    Redirect::to("/").into_response()
}

/// Edit form pre-filled with the stored client.
#[instrument(skip(state))]
pub async fn edit(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return Redirect::to("/").into_response();
    };

    let client = match state.store().get(id).await {
        Ok(Some(client)) => client,
        Ok(None) => return Redirect::to("/").into_response(),
        Err(e) => {
            tracing::error!(error = %e, client_id = %id, "Failed to load client");
            return Redirect::to("/").into_response();
        }
    };

    let form = FormView::new(ClientForm::from_client(&client), FormErrors::default());
    edit_form(&state, id, form).into_response()
}

/// Save the edit form. The point balance is never touched here.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ClientForm>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return Redirect::to("/").into_response();
    };

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                edit_form(&state, id, FormView::new(form, errors)),
            )
                .into_response();
        }
    };

    match state.store().update(id, &valid.into_update()).await {
        Ok(Some(_)) => {
            add_breadcrumb("clients", "Updated client", Some(&id.to_string()));
        }
        Ok(None) => tracing::warn!(client_id = %id, "Edited client no longer exists"),
        Err(e) => tracing::error!(error = %e, client_id = %id, "Failed to update client"),
    }
    Redirect::to("/").into_response()
}

/// Delete a client.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    if let Some(id) = parse_id(&id) {
        match state.store().delete(id).await {
            Ok(true) => {
                add_breadcrumb("clients", "Deleted client", Some(&id.to_string()));
                tracing::info!(client_id = %id, "Client deleted");
            }
            Ok(false) => tracing::warn!(client_id = %id, "Deleted client was already gone"),
            Err(e) => tracing::error!(error = %e, client_id = %id, "Failed to delete client"),
        }
    }
    Redirect::to("/")
}

/// Loyalty card with the stamp row and reward state.
#[instrument(skip(state))]
pub async fn card(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return Redirect::to("/").into_response();
    };

    let client = match state.store().get(id).await {
        Ok(Some(client)) => client,
        Ok(None) => return Redirect::to("/").into_response(),
        Err(e) => {
            tracing::error!(error = %e, client_id = %id, "Failed to load client");
            return Redirect::to("/").into_response();
        }
    };

    let points = client.loyalty_points;
    ClientCardTemplate {
        shop_name: state.shop_name().to_string(),
        client: ClientRowView::from(&client),
        stamps: stamps_for(points),
        rewards_earned: points.rewards_earned(),
        can_add_point: points.incremented().is_some(),
    }
    .into_response()
}

/// Add one point, then show the card again.
#[instrument(skip(state))]
pub async fn add_point(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    let Some(id) = parse_id(&id) else {
        return Redirect::to("/");
    };

    match state.store().increment_points(id).await {
        Ok(Some(client)) => {
            tracing::info!(
                client_id = %id,
                loyalty_points = client.loyalty_points.value(),
                reward_available = client.loyalty_points.reward_available(),
                "Loyalty point added"
            );
            Redirect::to(&format!("/clients/{id}/card"))
        }
        Ok(None) => Redirect::to("/"),
        Err(e) => {
            tracing::error!(error = %e, client_id = %id, "Failed to add loyalty point");
            Redirect::to(&format!("/clients/{id}/card"))
        }
    }
}
