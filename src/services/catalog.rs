//! Catalog management service

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookDetail, BookListEntry, CreateBook, UpdateBook},
        genre::Genre,
        user::User,
    },
    repository::Repository,
    sanitize,
    services::covers::{CoversService, UploadedCover},
};

/// Listing page size
pub const PER_PAGE: i64 = 10;

/// True when more books exist beyond the given page
pub fn has_next(total: i64, page: i64) -> bool {
    total > page * PER_PAGE
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    covers: CoversService,
}

impl CatalogService {
    pub fn new(repository: Repository, covers: CoversService) -> Self {
        Self { repository, covers }
    }

    /// One page of the listing, ordered by year descending
    pub async fn list_page(&self, page: i64) -> AppResult<(Vec<BookListEntry>, i64)> {
        let page = page.max(1);
        let offset = (page - 1) * PER_PAGE;
        self.repository.books.list(PER_PAGE, offset).await
    }

    /// Load a book row (used by handlers for policy checks)
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// All genres (form support data)
    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    /// Full detail payload for the book view, including everything the
    /// page needs for the given viewer.
    pub async fn get_detail(&self, id: i32, viewer: &User) -> AppResult<BookDetail> {
        let book = self.repository.books.get_by_id(id).await?;

        let genres = self.repository.books.genres_for(id).await?;
        let cover = match book.cover_id {
            Some(cover_id) => self.repository.covers.find_by_id(cover_id).await?,
            None => None,
        };
        let reviews = self.repository.reviews.list_for_book(id).await?;
        let user_review = self
            .repository
            .reviews
            .find_by_book_and_user(id, viewer.id)
            .await?;
        let my_collections = self
            .repository
            .collections
            .list_plain_for_user(viewer.id)
            .await?;

        let description_html = sanitize::render(&book.description);

        Ok(BookDetail {
            book,
            description_html,
            genres,
            cover,
            reviews,
            user_review,
            my_collections,
        })
    }

    /// Create a book, storing (or reusing) its cover first. The book row
    /// and its genre links are inserted atomically.
    pub async fn create_book(
        &self,
        mut book: CreateBook,
        cover: Option<UploadedCover>,
    ) -> AppResult<Book> {
        book.description = sanitize::clean(&book.description);

        let cover_id = match cover {
            Some(upload) => Some(self.covers.dedup_or_store(upload).await?.id),
            None => None,
        };

        self.repository.books.create_with_genres(&book, cover_id).await
    }

    /// Update a book and replace its genre set transactionally
    pub async fn update_book(&self, id: i32, mut book: UpdateBook) -> AppResult<Book> {
        book.description = sanitize::clean(&book.description);
        self.repository.books.update_with_genres(id, &book).await
    }

    /// Delete a book with its application-managed cascade, then remove the
    /// cover file and row when no other book still references it.
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        let book = self.repository.books.get_by_id(id).await?;

        self.repository.books.delete_cascade(id).await?;

        if let Some(cover_id) = book.cover_id {
            let remaining = self.repository.books.count_with_cover(cover_id).await?;
            if remaining == 0 {
                if let Some(cover) = self.repository.covers.find_by_id(cover_id).await? {
                    self.covers.delete_with_file(&cover).await?;
                }
            } else {
                tracing::debug!(
                    "Cover id={} kept, still referenced by {} book(s)",
                    cover_id,
                    remaining
                );
            }
        }

        Ok(())
    }
}
