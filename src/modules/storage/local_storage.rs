//! Local filesystem storage for uploaded report photos
//!
//! Files are written once under a generated name and never overwritten.
//! The generated name is `photo-<unix millis>-<random>` followed by the
//! original extension, so a reference is stable for the life of the file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;
use crate::shared::constants::{PHOTO_FILE_PREFIX, PHOTO_URL_PREFIX};
use crate::shared::validation::PHOTO_FILENAME_REGEX;

const MAX_NAME_ATTEMPTS: usize = 5;

/// A photo that has been written to storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    /// Generated filename inside the upload directory
    pub filename: String,
    /// Public reference, e.g. `/uploads/photo-1718000000000-42.jpg`
    pub url: String,
}

/// Photo storage rooted at a local directory
pub struct LocalPhotoStorage {
    root: PathBuf,
}

impl LocalPhotoStorage {
    /// Create the storage, making sure the upload directory exists
    pub async fn new(config: StorageConfig) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(&config.upload_dir).await?;

        info!(
            "Photo storage initialized at: {}",
            config.upload_dir.display()
        );

        Ok(Self {
            root: config.upload_dir,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate a unique filename from the current time, a random component
    /// and the extension of `original_filename`
    pub fn generate_filename(original_filename: &str) -> String {
        let millis = Utc::now().timestamp_millis();
        let random = Uuid::new_v4().as_u128() % 1_000_000_000;
        format!(
            "{}-{}-{}{}",
            PHOTO_FILE_PREFIX,
            millis,
            random,
            extension_of(original_filename)
        )
    }

    /// Write a photo to storage and return its stable reference
    pub async fn store(&self, data: &[u8], original_filename: &str) -> Result<StoredPhoto, AppError> {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = Self::generate_filename(original_filename);
            let path = self.root.join(&filename);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("Photo name collision on {}, retrying", filename);
                    continue;
                }
                Err(e) => return Err(AppError::Storage(e)),
            };

            if let Err(e) = write_all(&mut file, data).await {
                // Don't leave a truncated file behind
                let _ = tokio::fs::remove_file(&path).await;
                return Err(AppError::Storage(e));
            }

            info!("Photo stored: {} ({} bytes)", filename, data.len());

            return Ok(StoredPhoto {
                url: format!("{}/{}", PHOTO_URL_PREFIX, filename),
                filename,
            });
        }

        Err(AppError::Internal(
            "Could not allocate a unique photo filename".to_string(),
        ))
    }

    /// Read a stored photo by filename
    pub async fn load(&self, filename: &str) -> Result<Vec<u8>, AppError> {
        if !PHOTO_FILENAME_REGEX.is_match(filename) {
            return Err(AppError::BadRequest(format!(
                "Invalid photo name: {}",
                filename
            )));
        }

        match tokio::fs::read(self.root.join(filename)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("Photo {} not found", filename)))
            }
            Err(e) => Err(AppError::Storage(e)),
        }
    }
}

async fn write_all(file: &mut tokio::fs::File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.flush().await?;
    file.sync_all().await
}

/// Extension of the uploaded filename including the dot, lower-cased.
/// Empty when the name has no usable extension.
fn extension_of(original_filename: &str) -> String {
    Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| (1..=10).contains(&ext.len()))
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// MIME type served for a stored photo, derived from its extension
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
