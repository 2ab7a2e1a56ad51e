//! Review management service

use crate::{
    error::AppResult,
    models::review::{CreateReview, Review, ReviewWithAuthor},
    repository::Repository,
    sanitize,
};

#[derive(Clone)]
pub struct ReviewsService {
    repository: Repository,
}

impl ReviewsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Reviews for a book, with reviewer names
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<ReviewWithAuthor>> {
        // 404 for a missing book rather than an empty list
        self.repository.books.get_by_id(book_id).await?;
        self.repository.reviews.list_for_book(book_id).await
    }

    /// Post a review. A second review by the same user for the same book is
    /// rejected by the storage-level uniqueness constraint.
    pub async fn add(&self, book_id: i32, user_id: i32, review: CreateReview) -> AppResult<Review> {
        self.repository.books.get_by_id(book_id).await?;

        let text = sanitize::clean(&review.text);
        self.repository
            .reviews
            .create(book_id, user_id, review.rating, &text)
            .await
    }
}
