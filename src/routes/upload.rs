use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::imaging;

/// Hard cap on the incoming file, enforced while streaming so an oversized
/// upload is rejected without being buffered whole.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
    pub size: usize,
    pub original_size: usize,
    /// Size reduction against the original, formatted like `37.50%`.
    pub compression_ratio: String,
}

/// Upload a query image
///
/// Accepts one `image` part (JPG, PNG or WEBP, up to 10 MB), normalizes it
/// through the compression pipeline and stores the result under the upload
/// directory. Files are kept on local disk; object storage is the expected
/// home for them in a real deployment.
#[post("/image")]
pub async fn upload_image(
    config: web::Data<Config>,
    mut payload: Multipart,
) -> Result<impl Responder, AppError> {
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(mut field) = payload.try_next().await? {
        if field.name() != "image" {
            // Drain unrelated parts so the stream can move on.
            while field.try_next().await?.is_some() {}
            continue;
        }

        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string());
        match content_type.as_deref() {
            Some(essence) if ALLOWED_CONTENT_TYPES.contains(&essence) => {}
            _ => {
                return Err(AppError::BadRequest(
                    "Unsupported image format, only JPG, PNG and WEBP are accepted".into(),
                ))
            }
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if data.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::BadRequest("Image must not exceed 10 MB".into()));
            }
            data.extend_from_slice(&chunk);
        }

        image_data = Some(data);
        break;
    }

    let original = image_data.ok_or_else(|| AppError::BadRequest("Image file is required".into()))?;

    let processed = imaging::compress_to_jpeg(&original)?;

    let suffix = Uuid::new_v4().simple().to_string();
    let filename = format!("{}-{}.jpg", Utc::now().timestamp_millis(), &suffix[..8]);

    let upload_dir = Path::new(&config.upload_dir);
    tokio::fs::create_dir_all(upload_dir).await?;
    tokio::fs::write(upload_dir.join(&filename), &processed.data).await?;

    Ok(HttpResponse::Ok().json(UploadResponse {
        url: format!("/uploads/{}", filename),
        size: processed.data.len(),
        original_size: original.len(),
        compression_ratio: format!(
            "{:.2}%",
            (1.0 - processed.data.len() as f64 / original.len() as f64) * 100.0
        ),
        filename,
    }))
}
