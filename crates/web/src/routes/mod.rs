//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (store reachable)
//!
//! # Pages
//! GET  /?q=                     - Client list with search
//! GET  /clients/new             - Add client form
//! POST /clients                 - Create client
//! GET  /clients/{id}/edit       - Edit client form
//! POST /clients/{id}            - Save client
//! POST /clients/{id}/delete     - Delete client
//! GET  /clients/{id}/card       - Loyalty card
//! POST /clients/{id}/points     - Add a point
//!
//! # JSON API
//! /api/clients                  - See [`api::clients`]
//! ```

pub mod api;
pub mod clients;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the client page routes router.
pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(clients::create))
        .route("/new", get(clients::new_client))
        .route("/{id}", post(clients::update))
        .route("/{id}/edit", get(clients::edit))
        .route("/{id}/delete", post(clients::delete))
        .route("/{id}/card", get(clients::card))
        .route("/{id}/points", post(clients::add_point))
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/", get(clients::index))
        .nest("/clients", client_routes())
        .merge(api::router())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the client store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::db::MemoryClientStore;

    fn app_with(store: Arc<MemoryClientStore>) -> Router {
        routes().with_state(AppState::new(store, "Test Shop"))
    }

    #[tokio::test]
    async fn test_health() {
        let response = app_with(Arc::new(MemoryClientStore::new()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_readiness_follows_store() {
        let store = Arc::new(MemoryClientStore::new());
        let app = app_with(Arc::clone(&store));

        let response = app
            .clone()
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        store.set_offline(true);
        let response = app
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app_with(Arc::new(MemoryClientStore::new()))
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
