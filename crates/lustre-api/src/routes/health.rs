use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub const BANNER: &str = concat!("lustre search server v", env!("CARGO_PKG_VERSION"));

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
}

async fn banner() -> &'static str {
    BANNER
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "UP",
        "backend": state.search.backend_name(),
    }))
}
