//! API routes module

pub mod auth;
pub mod meetings;

use std::sync::Arc;

use axum::Router;

use crate::api::public::Envelope;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn health_handler() -> Envelope<serde_json::Value> {
    Envelope::ok(serde_json::json!({ "message": "API is running!" }))
}

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", axum::routing::get(health_handler))
        // OAuth routes
        .merge(auth::router())
        // Availability and booking routes
        .merge(meetings::router())
}
