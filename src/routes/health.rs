// src/routes/health.rs
//! Liveness endpoint for the dashboard backend.
//!
//! Sibling module in the `routes` directory:
//! - Internal to this file: the handler and its response type
//! - Exports to the gateway (`mod.rs`): a subrouter containing `/health`

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::AppState;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    cities: usize,
}

/// Handle `GET /health`.
///
/// Reports the service as reachable along with the size of the loaded
/// catalog. Generates nothing and draws no entropy.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cities: state.catalog.len(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
