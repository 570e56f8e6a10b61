//! JSON API routes.

pub mod clients;

use axum::Router;

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(clients::router())
}
