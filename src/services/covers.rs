//! Cover image storage service
//!
//! Covers are content-addressed: the SHA-256 of the uploaded bytes is the
//! dedup key, so byte-identical uploads share one row and one file. The file
//! itself is written under the configured upload directory, named by the
//! sanitized original filename. File writes are not transactional with the
//! database insert; a crash between the two can orphan a file.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::{
    config::UploadsConfig,
    error::{AppError, AppResult},
    models::cover::Cover,
    repository::Repository,
};

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

/// An uploaded cover file, as extracted from the multipart request
#[derive(Debug)]
pub struct UploadedCover {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct CoversService {
    repository: Repository,
    config: UploadsConfig,
}

impl CoversService {
    pub fn new(repository: Repository, config: UploadsConfig) -> Self {
        Self { repository, config }
    }

    /// Store an uploaded cover, reusing an existing row when a cover with
    /// the same content hash already exists.
    pub async fn dedup_or_store(&self, upload: UploadedCover) -> AppResult<Cover> {
        let content_hash = content_hash(&upload.bytes);

        if let Some(existing) = self.repository.covers.find_by_hash(&content_hash).await? {
            tracing::debug!("Reusing cover id={} for identical upload", existing.id);
            return Ok(existing);
        }

        let file_name = sanitize_file_name(&upload.file_name);
        let path = self.file_path(&file_name);
        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store cover file: {}", e)))?;

        self.repository
            .covers
            .create(&file_name, &upload.mime_type, &content_hash)
            .await
    }

    /// Remove a cover's file and row
    pub async fn delete_with_file(&self, cover: &Cover) -> AppResult<()> {
        let path = self.file_path(&cover.file_name);
        if path.exists() {
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to remove cover file: {}", e)))?;
        }
        self.repository.covers.delete(cover.id).await
    }

    fn file_path(&self, file_name: &str) -> PathBuf {
        Path::new(&self.config.dir).join(file_name)
    }
}

/// Compute the lowercase hex SHA-256 of uploaded bytes
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Reduce a client-supplied filename to a safe basename: path components
/// are dropped and anything outside [A-Za-z0-9._-] collapses to '_'.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let safe = UNSAFE_CHARS.replace_all(base, "_");
    let trimmed = safe.trim_matches(['_', '.']).to_string();
    if trimmed.is_empty() {
        "cover".to_string()
    } else {
        trimmed
    }
}
