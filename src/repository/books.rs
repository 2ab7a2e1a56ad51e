//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookListEntry, CreateBook, UpdateBook},
        genre::Genre,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Find book by ID, returning None on a miss
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, description, year, publisher, author, pages, cover_id \
             FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Paginated listing ordered by year descending, with aggregated genre
    /// names, average rating and review count per book.
    pub async fn list(&self, per_page: i64, offset: i64) -> AppResult<(Vec<BookListEntry>, i64)> {
        let entries = sqlx::query_as::<_, BookListEntry>(
            r#"
            SELECT b.id, b.title, b.year,
                   (SELECT STRING_AGG(g.name, ', ' ORDER BY g.name)
                    FROM book_genres bg
                    JOIN genres g ON g.id = bg.genre_id
                    WHERE bg.book_id = b.id) AS genres,
                   (SELECT AVG(r.rating)::float8 FROM reviews r WHERE r.book_id = b.id) AS average_rating,
                   (SELECT COUNT(*) FROM reviews r WHERE r.book_id = b.id) AS review_count
            FROM books b
            ORDER BY b.year DESC, b.id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok((entries, total))
    }

    /// Genres attached to a book
    pub async fn genres_for(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    /// Insert a book together with its genre links. Both succeed or neither
    /// does; any failure rolls the transaction back.
    pub async fn create_with_genres(
        &self,
        book: &CreateBook,
        cover_id: Option<i32>,
    ) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, description, year, publisher, author, pages, cover_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.description)
        .bind(book.year)
        .bind(&book.publisher)
        .bind(&book.author)
        .bind(book.pages)
        .bind(cover_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

        for genre_id in &book.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Update a book and replace its full genre set (delete-then-reinsert)
    /// in one transaction. On failure the original data stays visible.
    pub async fn update_with_genres(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE books
            SET title = $1, description = $2, year = $3, publisher = $4, author = $5, pages = $6
            WHERE id = $7
            "#,
        )
        .bind(&book.title)
        .bind(&book.description)
        .bind(book.year)
        .bind(&book.publisher)
        .bind(&book.author)
        .bind(book.pages)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        for genre_id in &book.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a book and its dependent rows (reviews, genre links) in one
    /// transaction. The cascade is application-managed; the schema does not
    /// cascade on its own.
    pub async fn delete_cascade(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM collection_books WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM reviews WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Number of books referencing a cover
    pub async fn count_with_cover(&self, cover_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE cover_id = $1")
            .bind(cover_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
