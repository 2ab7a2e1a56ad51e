//! Personal collection service
//!
//! Collections are strictly owner-scoped: viewing a collection or adding a
//! book to it requires the acting user to own it.

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookListEntry,
        collection::{Collection, CollectionSummary},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CollectionsService {
    repository: Repository,
}

impl CollectionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// The user's collections with member counts
    pub async fn list(&self, user_id: i32) -> AppResult<Vec<CollectionSummary>> {
        self.repository.collections.list_for_user(user_id).await
    }

    /// Create a collection owned by the user
    pub async fn create(&self, name: &str, user_id: i32) -> AppResult<Collection> {
        self.repository.collections.create(name, user_id).await
    }

    /// Collection detail with member books; owner only
    pub async fn detail(
        &self,
        id: i32,
        user_id: i32,
    ) -> AppResult<(Collection, Vec<BookListEntry>)> {
        let collection = self.owned(id, user_id).await?;
        let books = self.repository.collections.books_in(id).await?;
        Ok((collection, books))
    }

    /// Link a book into one of the user's collections
    pub async fn add_book(&self, collection_id: i32, book_id: i32, user_id: i32) -> AppResult<()> {
        self.owned(collection_id, user_id).await?;
        // Missing book is a 404, not a foreign-key failure
        self.repository.books.get_by_id(book_id).await?;
        self.repository.collections.add_book(collection_id, book_id).await
    }

    async fn owned(&self, id: i32, user_id: i32) -> AppResult<Collection> {
        let collection = self.repository.collections.get_by_id(id).await?;
        if collection.user_id != user_id {
            return Err(AppError::Authorization(
                "Only the owner may access this collection".to_string(),
            ));
        }
        Ok(collection)
    }
}
