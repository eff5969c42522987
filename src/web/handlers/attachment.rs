//! Image upload handler.

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::attachment::{AttachmentRepository, NewAttachment};
use crate::web::dto::{ApiResponse, UploadResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /api/upload-image - Upload an image for later attachment.
///
/// Request body: multipart/form-data with a "file" field. The image is
/// stored as an opaque blob and the returned reference can be attached
/// to a thread or reply. Uploads are not tied to the uploader.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let mut filename: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to read file content: {}", e);
                        ApiError::bad_request("Failed to read file")
                    })?
                    .to_vec(),
            );
        }
    }

    let filename = filename.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    let content = content.ok_or_else(|| ApiError::bad_request("No file content"))?;

    // Check file size
    if content.len() as u64 > state.max_upload_size {
        let max_mb = state.max_upload_size / 1024 / 1024;
        return Err(ApiError::bad_request(format!(
            "File too large (max {}MB)",
            max_mb
        )));
    }

    let attachment = {
        let db = state.db.lock().await;
        let repo = AttachmentRepository::new(&db);
        repo.create(&NewAttachment::new(&filename, content))
            .map_err(|e| {
                tracing::error!("Failed to store attachment: {}", e);
                ApiError::internal("Failed to store image")
            })?
    };

    let response = UploadResponse {
        image_ref: attachment.image_ref,
        filename: attachment.filename,
    };

    Ok(Json(ApiResponse::new(response)))
}
