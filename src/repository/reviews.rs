//! Reviews repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::review::{Review, ReviewWithAuthor, ReviewWithAuthorRow},
};

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: Pool<Postgres>,
}

impl ReviewsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Reviews for a book, newest first, joined with reviewer names
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<ReviewWithAuthor>> {
        let rows = sqlx::query_as::<_, ReviewWithAuthorRow>(
            r#"
            SELECT rv.id, rv.book_id, rv.user_id, rv.rating, rv.text, rv.created_at,
                   u.first_name, u.last_name
            FROM reviews rv
            JOIN users u ON u.id = rv.user_id
            WHERE rv.book_id = $1
            ORDER BY rv.created_at DESC
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ReviewWithAuthor::from).collect())
    }

    /// A given user's review of a given book, if any
    pub async fn find_by_book_and_user(
        &self,
        book_id: i32,
        user_id: i32,
    ) -> AppResult<Option<ReviewWithAuthor>> {
        let row = sqlx::query_as::<_, ReviewWithAuthorRow>(
            r#"
            SELECT rv.id, rv.book_id, rv.user_id, rv.rating, rv.text, rv.created_at,
                   u.first_name, u.last_name
            FROM reviews rv
            JOIN users u ON u.id = rv.user_id
            WHERE rv.book_id = $1 AND rv.user_id = $2
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ReviewWithAuthor::from))
    }

    /// Insert a review. The UNIQUE (book_id, user_id) constraint is the
    /// one-review-per-user-per-book enforcement; its violation surfaces as
    /// a conflict rather than a second row.
    pub async fn create(
        &self,
        book_id: i32,
        user_id: i32,
        rating: i16,
        text: &str,
    ) -> AppResult<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (book_id, user_id, rating, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, user_id, rating, text, created_at
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .bind(rating)
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "You have already reviewed this book"))?;

        Ok(review)
    }
}
