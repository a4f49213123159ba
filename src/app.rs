use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::AppConfig;
use crate::routes::{receipt_routes, system_routes};
use crate::state::receipts::ReceiptStore;

/// Build the complete Axum application:
/// - /receipts (process a receipt, fetch its points)
/// - /system   (alive, version, stats)
///
/// `store` is a shared handle; both route groups see the same receipts.
pub fn build_app(store: ReceiptStore, cfg: AppConfig) -> Router {
    Router::new()
        // /receipts/*
        .nest("/receipts", receipt_routes::routes(store.clone()))

        // /system/*
        .nest("/system", system_routes::routes(cfg, store))

        // Logging middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
