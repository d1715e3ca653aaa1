//! Session history endpoints: list, clear, and report download.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::info;

use lumen_core::HistoryEntry;
use lumen_session::{format_report, report_filename};

use crate::server::GatewayState;

/// `GET /api/history` — all entries, oldest first, with the renderable
/// image copy included for re-display.
pub async fn list_history(State(state): State<GatewayState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.list().await)
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub cleared: bool,
    pub len: usize,
}

/// `POST /api/history/clear` — idempotent session reset.
pub async fn clear_history(State(state): State<GatewayState>) -> Json<ClearResponse> {
    state.history.clear().await;
    info!("session history cleared");
    Json(ClearResponse {
        cleared: true,
        len: state.history.len().await,
    })
}

/// `GET /api/report/:index` — plain-text report for the entry at the
/// 1-based `index`, served as an attachment named
/// `analysis_report_<index>.txt`.
pub async fn download_report(
    State(state): State<GatewayState>,
    Path(index): Path<usize>,
) -> Response {
    let entry = match index.checked_sub(1) {
        Some(zero_based) => state.history.get(zero_based).await,
        None => None,
    };

    match entry {
        Some(entry) => {
            let body = format_report(&entry);
            let headers = [
                (
                    header::CONTENT_TYPE,
                    "text/plain; charset=utf-8".to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", report_filename(index)),
                ),
            ];
            (headers, body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "no such history entry").into_response(),
    }
}
