//! Image upload endpoints used by the admin panel.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::JsonBody;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
}

impl UploadResponse {
    const fn new(url: String) -> Self {
        Self { success: true, url }
    }
}

#[derive(Debug, Deserialize)]
pub struct Base64Upload {
    pub base64: Option<String>,
    pub folder: Option<String>,
}

/// Upload the `image` file of a multipart form. An optional `folder` text
/// field picks the destination folder.
///
/// POST /api/upload
#[instrument(skip(state, multipart))]
pub async fn multipart(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut image: Option<(Vec<u8>, String)> = None;
    let mut folder = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("image") => {
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field.bytes().await?;
                image = Some((bytes.to_vec(), mime));
            }
            Some("folder") => folder = field.text().await?,
            _ => {}
        }
    }

    let (bytes, mime) = image.ok_or_else(|| AppError::BadRequest("No image provided".to_owned()))?;
    let url = state.media().upload_bytes(bytes, &mime, &folder).await?;

    Ok(Json(UploadResponse::new(url)))
}

/// Upload a `data:image/...;base64,` string.
///
/// POST /api/upload/base64
#[instrument(skip(state, upload))]
pub async fn base64(
    State(state): State<AppState>,
    JsonBody(upload): JsonBody<Base64Upload>,
) -> Result<Json<UploadResponse>> {
    let data_uri = upload
        .base64
        .filter(|b| !b.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("No image provided".to_owned()))?;
    let folder = upload.folder.unwrap_or_default();

    let url = state.media().upload_data_uri(&data_uri, &folder).await?;
    Ok(Json(UploadResponse::new(url)))
}
