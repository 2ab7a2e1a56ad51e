//! Cover image metadata

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// An uploaded cover image. Files are deduplicated by content hash: two
/// byte-identical uploads share one row and one file on disk.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Cover {
    pub id: i32,
    pub file_name: String,
    pub mime_type: String,
    /// Lowercase hex SHA-256 of the file bytes
    pub content_hash: String,
}
