//! Collections repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookListEntry,
        collection::{Collection, CollectionSummary},
    },
};

#[derive(Clone)]
pub struct CollectionsRepository {
    pool: Pool<Postgres>,
}

impl CollectionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get collection by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Collection> {
        let collection = sqlx::query_as::<_, Collection>(
            "SELECT id, name, user_id FROM collections WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Collection with id {} not found", id)))?;

        Ok(collection)
    }

    /// A user's collections with their member counts
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<CollectionSummary>> {
        let collections = sqlx::query_as::<_, CollectionSummary>(
            r#"
            SELECT c.id, c.name,
                   (SELECT COUNT(*) FROM collection_books cb WHERE cb.collection_id = c.id) AS book_count
            FROM collections c
            WHERE c.user_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }

    /// A user's collections without counts (detail-page affordance)
    pub async fn list_plain_for_user(&self, user_id: i32) -> AppResult<Vec<Collection>> {
        let collections = sqlx::query_as::<_, Collection>(
            "SELECT id, name, user_id FROM collections WHERE user_id = $1 ORDER BY name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }

    /// Create a new collection owned by the given user
    pub async fn create(&self, name: &str, user_id: i32) -> AppResult<Collection> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            INSERT INTO collections (name, user_id)
            VALUES ($1, $2)
            RETURNING id, name, user_id
            "#,
        )
        .bind(name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(collection)
    }

    /// Member books of a collection, via the junction table
    pub async fn books_in(&self, collection_id: i32) -> AppResult<Vec<BookListEntry>> {
        let books = sqlx::query_as::<_, BookListEntry>(
            r#"
            SELECT b.id, b.title, b.year,
                   (SELECT STRING_AGG(g.name, ', ' ORDER BY g.name)
                    FROM book_genres bg
                    JOIN genres g ON g.id = bg.genre_id
                    WHERE bg.book_id = b.id) AS genres,
                   (SELECT AVG(r.rating)::float8 FROM reviews r WHERE r.book_id = b.id) AS average_rating,
                   (SELECT COUNT(*) FROM reviews r WHERE r.book_id = b.id) AS review_count
            FROM collection_books cb
            JOIN books b ON b.id = cb.book_id
            WHERE cb.collection_id = $1
            ORDER BY b.year DESC, b.id DESC
            "#,
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Link a book into a collection. The junction primary key rejects
    /// duplicate pairs; the violation surfaces as a conflict.
    pub async fn add_book(&self, collection_id: i32, book_id: i32) -> AppResult<()> {
        sqlx::query("INSERT INTO collection_books (collection_id, book_id) VALUES ($1, $2)")
            .bind(collection_id)
            .bind(book_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::conflict_on_unique(e, "Book is already in this collection"))?;

        Ok(())
    }
}
