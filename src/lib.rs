//! Receipt Processor: scores purchase receipts with loyalty points and
//! serves the results over HTTP. All state lives in memory.

pub mod amount;
pub mod app;
pub mod config;
pub mod errors;
pub mod routes;
pub mod services;
pub mod state;

pub use app::build_app;
pub use config::AppConfig;
pub use errors::{ConfigError, ReceiptError};
pub use services::points_service::calculate_points;
pub use state::receipts::{Item, Receipt, ReceiptStore, StoredReceipt};
