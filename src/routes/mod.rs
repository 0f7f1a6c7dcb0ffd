//! Router assembly.
//!
//! Binds the websocket endpoint, the health check, and room-id minting under
//! a single Axum router with permissive CORS and request tracing.

pub mod ws;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use rand::Rng;
use rand::distr::Alphanumeric;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::consts::ROOM_ID_LEN;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws::handle_ws))
        .route("/api/room", post(create_room))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Mint a fresh room identifier for a new session. The room itself is
/// created lazily when the first client joins it.
async fn create_room() -> Json<serde_json::Value> {
    let room_id: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ROOM_ID_LEN)
        .map(char::from)
        .collect();
    Json(serde_json::json!({ "room_id": room_id }))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
