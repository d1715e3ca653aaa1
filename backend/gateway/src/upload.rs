//! Image upload endpoint.
//!
//! Accepts one multipart form upload per request, sniffs the container
//! before decoding, and drives the analysis pipeline.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{info, warn};

use lumen_core::{HistoryEntry, LumenError, UploadedImage};

use crate::server::GatewayState;

/// Successful analysis: the recorded entry plus the upload metadata the
/// original tool echoed back (filename, container, dimensions, size).
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub entry: HistoryEntry,
    pub sniffed_mime: Option<&'static str>,
    pub size_bytes: usize,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Wrapper mapping each pipeline error kind onto its own status code and
/// user-facing message. Kinds are never collapsed into a catch-all.
pub struct ApiError(pub LumenError);

pub fn status_for(err: &LumenError) -> StatusCode {
    match err {
        LumenError::Decode(_) => StatusCode::BAD_REQUEST,
        LumenError::Auth(_) => StatusCode::BAD_GATEWAY,
        LumenError::Network(_) => StatusCode::BAD_GATEWAY,
        LumenError::Model(_) => StatusCode::BAD_GATEWAY,
        LumenError::Quota(_) => StatusCode::SERVICE_UNAVAILABLE,
        LumenError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.0.kind(),
            message: self.0.to_string(),
        };
        (status_for(&self.0), Json(body)).into_response()
    }
}

impl From<LumenError> for ApiError {
    fn from(err: LumenError) -> Self {
        Self(err)
    }
}

/// `POST /api/analyze` — one multipart field named `file`.
pub async fn analyze_image(
    State(state): State<GatewayState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut upload: Option<UploadedImage> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| LumenError::Decode(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| LumenError::Decode(format!("{filename}: {e}")))?;
            upload = Some(UploadedImage::new(filename, data));
            break;
        }
    }

    let upload = upload
        .ok_or_else(|| LumenError::Decode("missing multipart field \"file\"".to_string()))?;

    // Reject non-image payloads before handing bytes to the decoder.
    let sniffed_mime = media::sniff_format(&upload.bytes);
    if sniffed_mime.is_none() {
        return Err(LumenError::Decode(format!(
            "{}: not a supported image container",
            upload.filename
        ))
        .into());
    }

    let size_bytes = upload.size_bytes();
    info!(filename = %upload.filename, size_bytes, "upload received");

    let entry = state
        .pipeline
        .process(&upload.bytes, &upload.filename)
        .await
        .map_err(|e| {
            warn!(kind = e.kind(), filename = %upload.filename, "analysis failed: {e}");
            ApiError(e)
        })?;

    Ok(Json(AnalyzeResponse {
        entry,
        sniffed_mime,
        size_bytes,
    }))
}
