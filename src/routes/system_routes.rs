use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::config::AppConfig;
use crate::state::receipts::ReceiptStore;

#[derive(Clone)]
struct SystemState {
    config: AppConfig,
    store: ReceiptStore,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub receipts: usize,
}

pub fn routes(config: AppConfig, store: ReceiptStore) -> Router {
    Router::new()
        .route("/alive", get(is_alive))
        .route("/version", get(version))
        .route("/stats", get(stats))
        .with_state(SystemState { config, store })
}

/// GET /system/alive
async fn is_alive() -> &'static str {
    "OK"
}

/// GET /system/version
async fn version(State(state): State<SystemState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: state.config.server_version,
    })
}

/// GET /system/stats
async fn stats(State(state): State<SystemState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        receipts: state.store.len(),
    })
}
