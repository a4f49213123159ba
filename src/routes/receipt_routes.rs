use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::errors::ReceiptError;
use crate::services::receipt_service;
use crate::state::receipts::ReceiptStore;

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub points: i64,
}

/// Build all receipt routes under /receipts
pub fn routes(store: ReceiptStore) -> Router {
    Router::new()
        .route("/process", post(process_receipt))
        .route("/:id/points", get(get_points))
        .with_state(store)
}

//
// ─────────────────────────────────────────────────────────────
// POST /receipts/process
// Score and store a receipt, return its id
// ─────────────────────────────────────────────────────────────
//
// The body is taken as raw bytes so that every decoding failure
// (syntax, missing field, wrong type, no content-type) is a 400.
async fn process_receipt(
    State(store): State<ReceiptStore>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ReceiptError>
{
    let receipt = receipt_service::decode(&body)?;
    let id = receipt_service::process(&store, receipt);
    Ok(Json(ProcessResponse { id }))
}

//
// ─────────────────────────────────────────────────────────────
// GET /receipts/{id}/points
// Return the stored points or 404
// ─────────────────────────────────────────────────────────────
//
async fn get_points(
    Path(id): Path<String>,
    State(store): State<ReceiptStore>,
) -> Result<Json<PointsResponse>, ReceiptError>
{
    let points = receipt_service::points(&store, &id)?;
    Ok(Json(PointsResponse { points }))
}
