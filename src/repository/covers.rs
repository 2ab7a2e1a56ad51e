//! Covers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::cover::Cover};

#[derive(Clone)]
pub struct CoversRepository {
    pool: Pool<Postgres>,
}

impl CoversRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Find cover by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Cover>> {
        let cover = sqlx::query_as::<_, Cover>(
            "SELECT id, file_name, mime_type, content_hash FROM covers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(cover)
    }

    /// Look up an existing cover by content hash (dedup key)
    pub async fn find_by_hash(&self, content_hash: &str) -> AppResult<Option<Cover>> {
        let cover = sqlx::query_as::<_, Cover>(
            "SELECT id, file_name, mime_type, content_hash FROM covers WHERE content_hash = $1",
        )
        .bind(content_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(cover)
    }

    /// Insert a new cover row
    pub async fn create(
        &self,
        file_name: &str,
        mime_type: &str,
        content_hash: &str,
    ) -> AppResult<Cover> {
        let cover = sqlx::query_as::<_, Cover>(
            r#"
            INSERT INTO covers (file_name, mime_type, content_hash)
            VALUES ($1, $2, $3)
            RETURNING id, file_name, mime_type, content_hash
            "#,
        )
        .bind(file_name)
        .bind(mime_type)
        .bind(content_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(cover)
    }

    /// Delete a cover row
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM covers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
