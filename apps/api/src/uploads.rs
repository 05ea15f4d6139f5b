use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::extract::multipart::Field;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;

/// URL prefix under which uploaded files are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Request body cap for the multipart forms.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Writes uploaded image bytes to a local directory and hands back the
/// public `/uploads/<file>` reference. The core never touches the bytes.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Opens the upload directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create upload dir '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stores `data` under a collision-free name derived from `original_name`.
    pub async fn save(&self, original_name: Option<&str>, data: &[u8]) -> std::io::Result<String> {
        let file_name = format!(
            "{}-{}",
            Uuid::new_v4().simple(),
            sanitize_file_name(original_name.unwrap_or_default())
        );
        tokio::fs::write(self.dir.join(&file_name), data).await?;

        info!("Stored upload {file_name} ({} bytes)", data.len());
        Ok(format!("{UPLOADS_ROUTE}/{file_name}"))
    }

    /// Stores an image form part. An empty part (no file chosen) is `None`.
    pub async fn save_image_field(&self, field: Field<'_>) -> Result<Option<String>, AppError> {
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        let data = field.bytes().await?;
        if data.is_empty() {
            debug!("Empty image part; treating as absent");
            return Ok(None);
        }
        if let Some(content_type) = content_type.filter(|ct| !ct.starts_with("image/")) {
            return Err(AppError::Validation(format!(
                "expected an image upload, got '{content_type}'"
            )));
        }

        Ok(Some(self.save(file_name.as_deref(), &data).await?))
    }
}

/// Keeps only the final path component and a conservative character set.
fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
