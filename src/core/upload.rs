//! Upload adapter: store a local file in a bucket and resolve its public URL.

use crate::backend::Backend;
use crate::core::service::{DataService, logged};
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use std::path::Path;

pub const DEFAULT_BUCKET: &str = "photos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub url: String,
    pub file_name: String,
}

/// `<unix-millis>-<original name>`; avoids collisions, not a content address.
pub fn stamped_name(original: &str, millis: i64) -> String {
    format!("{millis}-{original}")
}

pub fn content_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}

impl<B: Backend> DataService<B> {
    /// Upload `path` into `bucket` (default `photos`).
    pub async fn upload_file(&self, path: &Path, bucket: Option<&str>) -> AppResult<UploadReport> {
        let bucket = bucket.unwrap_or(DEFAULT_BUCKET);

        let result = async {
            let original = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| AppError::Other(format!("not a file: {}", path.display())))?;

            let bytes = tokio::fs::read(path).await?;
            let file_name = stamped_name(original, Utc::now().timestamp_millis());

            self.backend()
                .upload(bucket, &file_name, bytes, content_type_for(original))
                .await?;

            let url = self.backend().public_url(bucket, &file_name);
            Ok::<_, AppError>(UploadReport { url, file_name })
        }
        .await;

        if let Ok(r) = &result {
            tracing::info!(bucket, file = %r.file_name, "file uploaded");
        }
        logged("uploading file", result)
    }
}
