//! Handler for the image formatting endpoint.
//!
//! `POST /format` accepts a multipart form with a repeated `images` file
//! field and an optional `fill_mode` text field, and answers with a ZIP of
//! every image that could be normalized.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use canvasify_core::{process_batch_until, FillMode, UploadItem};
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Name of the repeated file field carrying the uploads.
pub const IMAGES_FIELD: &str = "images";

/// Name of the optional text field selecting the placement strategy.
pub const FILL_MODE_FIELD: &str = "fill_mode";

/// Filename offered to the client for the archive.
pub const ARCHIVE_FILENAME: &str = "formatted_images.zip";

/// Fields of interest collected from the multipart body.
#[derive(Debug, Default)]
struct FormatForm {
    /// `None` when the request carried no `images` file part at all.
    images: Option<Vec<UploadItem>>,
    fill_mode: Option<String>,
}

/// POST /format
///
/// Reads the whole form first so that the upload ceiling is enforced before
/// any image is decoded, then normalizes the batch on the blocking pool.
/// If this future is dropped (client gone, request timeout) the batch stops
/// at the next item instead of running on detached.
pub async fn format_images(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Response> {
    let multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let limit = state.config.max_upload_bytes;

    let form = read_form(multipart, limit).await?;
    let Some(items) = form.images else {
        return Err(AppError::BadRequest("No images uploaded".to_string()));
    };

    let mode = form
        .fill_mode
        .as_deref()
        .map_or(FillMode::default(), FillMode::from_form_value);
    let options = state.config.package_options();

    tracing::info!(items = items.len(), %mode, "Formatting upload batch");

    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();

    let report = tokio::task::spawn_blocking(move || {
        process_batch_until(items, mode, &options, || cancel.is_cancelled())
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Batch worker failed: {e}")))??;

    tracing::debug!(entries = ?report.entry_names(), "Archive ready");

    Ok(zip_attachment(report.archive))
}

async fn read_form(mut multipart: Multipart, limit: usize) -> AppResult<FormatForm> {
    let mut form = FormatForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);

        match (name.as_deref(), file_name) {
            // Only parts with a filename parameter count as files
            (Some(IMAGES_FIELD), Some(filename)) => {
                let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
                form.images
                    .get_or_insert_with(Vec::new)
                    .push(UploadItem::new(filename, bytes.to_vec()));
            }
            (Some(FILL_MODE_FIELD), None) => {
                let value = field.text().await.map_err(|e| multipart_error(e, limit))?;
                // First occurrence wins
                form.fill_mode.get_or_insert(value);
            }
            _ => {
                tracing::debug!(field = ?name, "Ignoring unexpected form field");
            }
        }
    }

    Ok(form)
}

fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(limit, "Upload exceeded body limit while streaming");
        AppError::PayloadTooLarge { limit_bytes: limit }
    } else {
        AppError::BadRequest(err.body_text())
    }
}

fn zip_attachment(archive: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{ARCHIVE_FILENAME}\"");
    let disposition = HeaderValue::from_str(&disposition)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/zip")),
            (CONTENT_DISPOSITION, disposition),
        ],
        archive,
    )
        .into_response()
}
