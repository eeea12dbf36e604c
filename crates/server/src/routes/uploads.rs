//! Order image upload route handler.
//!
//! Accepts a multipart form of up to five images, each at most 5 MB. The
//! whole batch is read and validated before any byte leaves the server, so
//! an invalid batch rejects with no side effects. Uploads then run
//! sequentially and abort on the first failure; objects already stored by
//! an aborted or abandoned batch are not cleaned up (a known gap, same as
//! the submission flow that references them).

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::storage;
use crate::state::AppState;

/// Maximum number of images per order.
pub const MAX_IMAGES: usize = 5;

/// Maximum size of a single image in bytes (5 MB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Response body: public URLs in the order the files were submitted.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub urls: Vec<String>,
}

struct PendingUpload {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Upload order images and return their public URLs.
#[instrument(skip(state, multipart))]
pub async fn upload_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let mut pending: Vec<PendingUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        // Non-file fields in the form are ignored.
        let Some(filename) = field.file_name().map(ToOwned::to_owned) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        if pending.len() >= MAX_IMAGES {
            return Err(AppError::BadRequest(format!(
                "At most {MAX_IMAGES} images are allowed"
            )));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::BadRequest(format!(
                "Image {filename} exceeds the 5 MB limit"
            )));
        }
        if bytes.is_empty() {
            return Err(AppError::BadRequest(format!("Image {filename} is empty")));
        }

        pending.push(PendingUpload {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    if pending.is_empty() {
        return Err(AppError::BadRequest("No images in request".to_string()));
    }

    let mut urls = Vec::with_capacity(pending.len());
    for upload in pending {
        let object = storage::object_name(&upload.filename);
        let url = state
            .storage()
            .upload(&object, upload.bytes, &upload.content_type)
            .await?;
        urls.push(url);
    }

    tracing::info!(count = urls.len(), "Order images uploaded");
    Ok((StatusCode::CREATED, Json(UploadResponse { urls })))
}
