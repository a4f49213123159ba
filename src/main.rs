/*****************************************************************************************
 *
 *  Receipt Processor – Loyalty Points Microservice in Rust
 *  --------------------------------------------------------
 *
 *  POST /receipts/process      score + store a receipt
 *  GET  /receipts/{id}/points  look up the score
 *
 *****************************************************************************************/

use tokio::net::TcpListener;
use axum::serve;

use tracing_subscriber::FmtSubscriber;

use receipt_processor::{build_app, AppConfig, ReceiptStore};

#[tokio::main]
async fn main() {
    //
    // ────────────────────────────────────────────────────────
    //  Load configuration (config.json is optional)
    // ────────────────────────────────────────────────────────
    //
    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cfg.level_filter())
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    tracing::info!("Starting Receipt Processor…");
    tracing::info!("Loaded configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Create the receipt store and the Axum app
    // ────────────────────────────────────────────────────────
    //
    let store = ReceiptStore::new();
    let app = build_app(store.clone(), cfg.clone());

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("Listening on http://{}", addr);

    serve(listener, app)
        .with_graceful_shutdown(shutdown(store))
        .await
        .expect("Server error");
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown(store: ReceiptStore) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Keep serving; the process can still be killed.
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    tracing::warn!(
        "CTRL+C received — discarding {} receipts. Goodbye.",
        store.len()
    );
}
