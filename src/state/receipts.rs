use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::errors::ReceiptError;

/// One line item as submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,
    pub price: String,
}

/// A receipt as submitted to `POST /receipts/process`.
///
/// Every field is kept as the client sent it. Numeric and date/time
/// parsing happens during scoring, where malformed values degrade to
/// zero instead of rejecting the receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub total: String,
    pub items: Vec<Item>,
}

/// A scored receipt held by the store.
///
/// `created_at` is the Unix timestamp (seconds since epoch) at which
/// the receipt was processed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredReceipt {
    pub id: String,
    pub points: i64,
    pub created_at: i64,
    pub receipt: Receipt,
}

/// Internal HashMap type.
type InnerMap = HashMap<String, StoredReceipt>;

/// In-memory receipt store shared across handlers.
///
/// Cloning is cheap and yields another handle to the same map. Entries
/// are only ever added; nothing expires.
#[derive(Debug, Clone, Default)]
pub struct ReceiptStore {
    inner: Arc<RwLock<InnerMap>>,
}

impl ReceiptStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) the entry for `id`.
    pub fn put(&self, id: String, receipt: StoredReceipt) {
        // The map is never left half-updated, so a poisoned lock is safe to reuse.
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(id, receipt);
    }

    pub fn get(&self, id: &str) -> Result<StoredReceipt, ReceiptError> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(id).cloned().ok_or(ReceiptError::NotFound)
    }

    /// Number of stored receipts.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
