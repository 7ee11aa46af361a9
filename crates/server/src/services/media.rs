//! Image uploads.
//!
//! Every upload tries, in order:
//!
//! 1. Cloudinary, when configured (signed upload API)
//! 2. The local upload directory, served under `/uploads`
//! 3. A fixed placeholder photo
//!
//! Only malformed input is an error. Host and disk failures are logged and
//! fall through to the next step.

use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::ExposeSecret;
use serde::Deserialize;
use sha1::{Digest, Sha1};
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::config::CloudinaryConfig;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Folder prefix on the media host.
const HOST_FOLDER_PREFIX: &str = "royal_trust";

/// Resize applied to images uploaded as data URIs.
const DATA_URI_TRANSFORMATION: &str = "c_limit,h_800,w_1200/q_auto:good";

/// Returned when neither the media host nor the disk accepted the image.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1596755094514-f87e34085b2c?w=800";

const DEFAULT_FOLDER: &str = "general";

/// Accepted image MIME types and the file extension used for each.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Errors for uploads the server refuses to process.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("invalid data URI")]
    InvalidDataUri,

    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("media host client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl MediaError {
    /// Whether the error was caused by the client's input.
    #[must_use]
    pub const fn is_bad_input(&self) -> bool {
        !matches!(self, Self::Client(_))
    }
}

/// Media host reachability, as reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudinaryStatus {
    Connected,
    Error,
    NotConfigured,
}

impl CloudinaryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Error => "error",
            Self::NotConfigured => "not configured",
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// An image ready to upload.
struct ImagePayload<'a> {
    bytes: Vec<u8>,
    mime: &'a str,
    extension: &'static str,
    /// The original data URI, sent to the host as-is.
    data_uri: Option<&'a str>,
}

/// Uploads images to the media host with local fallback.
#[derive(Clone)]
pub struct MediaService {
    client: reqwest::Client,
    cloudinary: Option<CloudinaryConfig>,
    upload_dir: PathBuf,
}

impl MediaService {
    /// Create a media service.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Client` if the HTTP client fails to build.
    pub fn new(
        cloudinary: Option<CloudinaryConfig>,
        upload_dir: impl Into<PathBuf>,
    ) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            cloudinary,
            upload_dir: upload_dir.into(),
        })
    }

    #[must_use]
    pub const fn is_host_configured(&self) -> bool {
        self.cloudinary.is_some()
    }

    /// Upload an image given as a `data:<mime>;base64,<payload>` URI and
    /// return its public URL.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::InvalidDataUri`, `UnsupportedType` or `Decode`
    /// when the input is not an acceptable image.
    #[instrument(skip(self, data_uri), fields(len = data_uri.len()))]
    pub async fn upload_data_uri(&self, data_uri: &str, folder: &str) -> Result<String, MediaError> {
        let (mime, payload) = parse_data_uri(data_uri)?;
        let extension = extension_for(mime)?;
        let bytes = STANDARD.decode(payload.trim())?;

        let image = ImagePayload {
            bytes,
            mime,
            extension,
            data_uri: Some(data_uri),
        };
        Ok(self.store(&image, folder).await)
    }

    /// Upload raw image bytes (from a multipart form) and return the public
    /// URL.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::UnsupportedType` for a non-image MIME type.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn upload_bytes(
        &self,
        bytes: Vec<u8>,
        mime: &str,
        folder: &str,
    ) -> Result<String, MediaError> {
        let mime = mime.trim().to_ascii_lowercase();
        let extension = extension_for(&mime)?;

        let image = ImagePayload {
            bytes,
            mime: &mime,
            extension,
            data_uri: None,
        };
        Ok(self.store(&image, folder).await)
    }

    /// Probe the media host's ping endpoint.
    pub async fn ping(&self) -> CloudinaryStatus {
        let Some(config) = &self.cloudinary else {
            return CloudinaryStatus::NotConfigured;
        };

        let url = format!("{API_BASE}/{}/ping", config.cloud_name);
        let result = self
            .client
            .get(&url)
            .basic_auth(&config.api_key, Some(config.api_secret.expose_secret()))
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => CloudinaryStatus::Connected,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Cloudinary ping failed");
                CloudinaryStatus::Error
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cloudinary ping failed");
                CloudinaryStatus::Error
            }
        }
    }

    async fn store(&self, image: &ImagePayload<'_>, folder: &str) -> String {
        let folder = sanitize_folder(folder);

        if let Some(config) = &self.cloudinary {
            match self.upload_to_host(config, image, &folder).await {
                Ok(url) => return url,
                Err(e) => tracing::warn!(error = %e, "Cloudinary upload failed, saving locally"),
            }
        }

        match save_local(&self.upload_dir, &folder, image).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, "Local upload failed, using placeholder image");
                PLACEHOLDER_IMAGE_URL.to_owned()
            }
        }
    }

    async fn upload_to_host(
        &self,
        config: &CloudinaryConfig,
        image: &ImagePayload<'_>,
        folder: &str,
    ) -> Result<String, MediaError> {
        let host_folder = format!("{HOST_FOLDER_PREFIX}/{folder}");
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let mut params = vec![("folder", host_folder.as_str()), ("timestamp", timestamp.as_str())];
        if image.data_uri.is_some() {
            params.push(("transformation", DATA_URI_TRANSFORMATION));
        }
        let signature = sign_params(&params, config.api_secret.expose_secret());

        let file = match image.data_uri {
            Some(uri) => reqwest::multipart::Part::text(uri.to_owned()),
            None => reqwest::multipart::Part::bytes(image.bytes.clone())
                .file_name(format!("upload.{}", image.extension))
                .mime_str(image.mime)?,
        };

        let mut form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("api_key", config.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key.to_owned(), value.to_owned());
        }

        let url = format!("{API_BASE}/{}/auto/upload", config.cloud_name);
        let response: UploadResponse = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::info!(url = %response.secure_url, "Uploaded image to Cloudinary");
        Ok(response.secure_url)
    }
}

async fn save_local(
    upload_dir: &Path,
    folder: &str,
    image: &ImagePayload<'_>,
) -> std::io::Result<String> {
    let dir = upload_dir.join(folder);
    tokio::fs::create_dir_all(&dir).await?;

    let file_name = format!("{}.{}", Uuid::new_v4(), image.extension);
    tokio::fs::write(dir.join(&file_name), &image.bytes).await?;

    tracing::info!(folder = %folder, file = %file_name, "Saved image locally");
    Ok(format!("/uploads/{folder}/{file_name}"))
}

/// Split a base64 data URI into its MIME type and payload.
fn parse_data_uri(uri: &str) -> Result<(&str, &str), MediaError> {
    let rest = uri.strip_prefix("data:").ok_or(MediaError::InvalidDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(MediaError::InvalidDataUri)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(MediaError::InvalidDataUri)?;
    if payload.is_empty() {
        return Err(MediaError::InvalidDataUri);
    }
    Ok((mime, payload))
}

fn extension_for(mime: &str) -> Result<&'static str, MediaError> {
    let mime = mime.to_ascii_lowercase();
    ALLOWED_TYPES
        .iter()
        .find(|(allowed, _)| *allowed == mime)
        .map(|(_, ext)| *ext)
        .ok_or(MediaError::UnsupportedType(mime))
}

/// Reduce a caller-supplied folder to `[a-z0-9_/-]` with no empty segments.
fn sanitize_folder(folder: &str) -> String {
    let cleaned: String = folder
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/'))
        .collect();
    let joined = cleaned
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        DEFAULT_FOLDER.to_owned()
    } else {
        joined
    }
}

/// Cloudinary request signature: SHA-1 of the `key=value` pairs sorted by
/// key and joined with `&`, followed by the API secret.
fn sign_params(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn temp_upload_dir() -> PathBuf {
        std::env::temp_dir().join(format!("royal-trust-media-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_parse_data_uri() {
        let uri = format!("data:image/png;base64,{PIXEL}");
        let (mime, payload) = parse_data_uri(&uri).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(payload, PIXEL);

        assert!(parse_data_uri("image/png;base64,abc").is_err());
        assert!(parse_data_uri("data:image/png,abc").is_err());
        assert!(parse_data_uri("data:image/png;base64,").is_err());
    }

    #[test]
    fn test_extension_allowlist() {
        assert_eq!(extension_for("image/jpeg").unwrap(), "jpg");
        assert_eq!(extension_for("IMAGE/WEBP").unwrap(), "webp");
        assert!(matches!(
            extension_for("image/svg+xml"),
            Err(MediaError::UnsupportedType(_))
        ));
        assert!(extension_for("application/pdf").is_err());
    }

    #[test]
    fn test_sanitize_folder() {
        assert_eq!(sanitize_folder("products/colors"), "products/colors");
        assert_eq!(sanitize_folder("../../etc"), "etc");
        assert_eq!(sanitize_folder("Sliders "), "sliders");
        assert_eq!(sanitize_folder("//"), "general");
        assert_eq!(sanitize_folder(""), "general");
    }

    #[test]
    fn test_sign_params_sorts_keys() {
        let a = sign_params(&[("timestamp", "1700000000"), ("folder", "royal_trust/x")], "s3cr3t");
        let b = sign_params(&[("folder", "royal_trust/x"), ("timestamp", "1700000000")], "s3cr3t");
        assert_eq!(a, b);

        let expected = hex::encode(Sha1::digest(b"folder=royal_trust/x&timestamp=1700000000s3cr3t"));
        assert_eq!(a, expected);
        assert_eq!(a.len(), 40);
    }

    #[tokio::test]
    async fn test_data_uri_saved_locally_without_host() {
        let dir = temp_upload_dir();
        let media = MediaService::new(None, &dir).unwrap();

        let url = media
            .upload_data_uri(&format!("data:image/png;base64,{PIXEL}"), "sliders")
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/sliders/"));
        assert!(url.ends_with(".png"));
        let file = dir.join(url.trim_start_matches("/uploads/"));
        assert!(file.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let media = MediaService::new(None, temp_upload_dir()).unwrap();
        let result = media
            .upload_bytes(b"%PDF-1.7".to_vec(), "application/pdf", "docs")
            .await;
        assert!(matches!(result, Err(MediaError::UnsupportedType(_))));
        assert!(result.unwrap_err().is_bad_input());
    }

    #[tokio::test]
    async fn test_ping_without_host() {
        let media = MediaService::new(None, temp_upload_dir()).unwrap();
        assert_eq!(media.ping().await, CloudinaryStatus::NotConfigured);
    }
}
