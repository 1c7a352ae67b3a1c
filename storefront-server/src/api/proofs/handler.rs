//! Payment Proof Handlers
//!
//! Uploads are decoded and re-encoded as JPEG before storage, so only real
//! images land in the bucket and every stored proof is `{uuid}.jpg`.

use std::io::Cursor;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use http::header;
use shared::client::ProofUploadResponse;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode, multipart_error};

/// JPEG quality for stored proofs (keeps receipts legible at a modest size)
const JPEG_QUALITY: u8 = 85;

const STORED_CONTENT_TYPE: &str = "image/jpeg";

struct UploadedFile {
    original_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

/// Declared MIME type, falling back to a guess from the file name
fn effective_mime(file: &UploadedFile) -> Option<String> {
    file.content_type
        .clone()
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream")
        .or_else(|| {
            file.original_name
                .as_deref()
                .and_then(|n| mime_guess::from_path(n).first_raw())
                .map(str::to_string)
        })
}

/// Decode any supported image and re-encode it as JPEG
fn reencode_jpeg(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidImage, format!("Invalid image: {e}"))
    })?;

    let mut buffer = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buffer), JPEG_QUALITY);
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| AppError::internal(format!("Failed to encode image: {e}")))?;
    Ok(buffer)
}

/// `POST /api/proofs`
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<ProofUploadResponse>> {
    let mut uploaded = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            let original_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.map_err(multipart_error)?;
            uploaded = Some(UploadedFile {
                original_name,
                content_type,
                data,
            });
            break;
        }
    }

    let file = uploaded.ok_or_else(|| {
        AppError::with_message(ErrorCode::ProofRequired, "No 'file' field found")
            .with_detail("field", "file")
    })?;

    if file.data.is_empty() {
        return Err(AppError::with_message(ErrorCode::InvalidImage, "Empty file provided"));
    }
    let max = state.config.max_upload_bytes;
    if file.data.len() > max {
        return Err(AppError::new(ErrorCode::FileTooLarge)
            .with_detail("max_bytes", max)
            .with_detail("size", file.data.len()));
    }
    match effective_mime(&file) {
        Some(mime) if mime.starts_with("image/") => {}
        other => {
            return Err(AppError::new(ErrorCode::UnsupportedFileType)
                .with_detail("content_type", other.unwrap_or_default()));
        }
    }

    let data = file.data;
    let jpeg = tokio::task::spawn_blocking(move || reencode_jpeg(&data))
        .await
        .map_err(|e| AppError::internal(format!("Image task failed: {e}")))??;

    let file_name = format!("{}.jpg", Uuid::new_v4());
    let size = jpeg.len();
    state.proofs.put(&file_name, jpeg).await?;

    tracing::info!(
        file_name = %file_name,
        original_name = file.original_name.as_deref().unwrap_or("-"),
        size,
        "Payment proof stored"
    );

    Ok(Json(ProofUploadResponse {
        url: state.proofs.public_url(&file_name),
        file_name,
        size,
        content_type: STORED_CONTENT_TYPE.to_string(),
    }))
}

/// `GET /api/proofs/{file_name}`
pub async fn serve(
    State(state): State<ServerState>,
    Path(file_name): Path<String>,
) -> AppResult<Response> {
    let data = state.proofs.get(&file_name).await?;
    let content_type = mime_guess::from_path(&file_name)
        .first_raw()
        .unwrap_or(STORED_CONTENT_TYPE);
    Ok(([(header::CONTENT_TYPE, content_type)], data).into_response())
}
