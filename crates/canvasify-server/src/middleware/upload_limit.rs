//! Upload ceiling enforced from the `Content-Length` header.
//!
//! Requests that announce a body larger than the configured ceiling are
//! rejected with 413 before a single body byte is read. Bodies without a
//! length are capped separately by axum's `DefaultBodyLimit`, which surfaces
//! as a multipart read error in the handler.

use axum::extract::{Request, State};
use axum::http::header::CONTENT_LENGTH;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;
use crate::state::AppState;

/// Reject requests whose declared body length exceeds the upload ceiling.
pub async fn enforce_upload_ceiling(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let limit = state.config.max_upload_bytes;

    if let Some(length) = declared_length(request.headers()) {
        if length > limit as u64 {
            tracing::warn!(
                content_length = length,
                limit,
                path = %request.uri().path(),
                "Rejecting oversized upload"
            );
            return Err(AppError::PayloadTooLarge { limit_bytes: limit });
        }
    }

    Ok(next.run(request).await)
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
