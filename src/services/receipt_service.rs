use chrono::Utc;
use uuid::Uuid;

use crate::errors::ReceiptError;
use crate::services::points_service;
use crate::state::receipts::{Receipt, ReceiptStore, StoredReceipt};

/// Decode a raw request body into a receipt.
pub fn decode(body: &[u8]) -> Result<Receipt, ReceiptError> {
    Ok(serde_json::from_slice::<Receipt>(body)?)
}

/// Score a receipt, store it under a fresh id and return that id.
pub fn process(store: &ReceiptStore, receipt: Receipt) -> String {
    let id = Uuid::new_v4().to_string();
    let points = points_service::calculate_points(&receipt);

    let entry = StoredReceipt {
        id: id.clone(),
        points,
        created_at: Utc::now().timestamp(),
        receipt,
    };
    store.put(id.clone(), entry);

    tracing::info!(id = %id, points, "receipt processed");
    id
}

/// Points previously awarded to the receipt `id`.
pub fn points(store: &ReceiptStore, id: &str) -> Result<i64, ReceiptError> {
    let entry = store.get(id).map_err(|e| {
        tracing::debug!(id, "receipt not found");
        e
    })?;
    Ok(entry.points)
}
