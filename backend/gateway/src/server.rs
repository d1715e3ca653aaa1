//! Main HTTP server for the Lumen image analyzer.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use lumen_pipeline::AnalysisPipeline;
use lumen_session::HistoryStore;

use crate::history_api;
use crate::upload;

/// Upload ceiling enforced at the framework boundary.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application state shared across routes.
///
/// One state value corresponds to one session: the pipeline writes into
/// the same history the read-side handlers list from.
#[derive(Clone)]
pub struct GatewayState {
    pub pipeline: Arc<AnalysisPipeline>,
    pub history: HistoryStore,
}

/// Build the application router.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/analyze", post(upload::analyze_image))
        .route("/api/history", get(history_api::list_history))
        .route("/api/history/clear", post(history_api::clear_history))
        .route("/api/report/:index", get(history_api::download_report))
        .route("/api/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the Axum HTTP server.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = router(state);

    info!("Lumen HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
