//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{collection::Collection, cover::Cover, genre::Genre, review::ReviewWithAuthor};

/// Book row as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    /// Plain text; markup is stripped before storage
    pub description: String,
    pub year: i32,
    pub publisher: String,
    pub author: String,
    pub pages: i32,
    pub cover_id: Option<i32>,
}

/// Listing entry: one row of the paginated index
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookListEntry {
    pub id: i32,
    pub title: String,
    pub year: i32,
    /// Comma-separated genre names, absent when the book has none
    pub genres: Option<String>,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

/// Book list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub page: Option<i64>,
}

/// Fields accepted when creating a book (multipart form, cover handled
/// separately)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub description: String,
    #[validate(range(min = 0, max = 2100, message = "Year out of range"))]
    pub year: i32,
    #[validate(length(min = 1, message = "Publisher must not be empty"))]
    pub publisher: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    #[validate(range(min = 1, message = "Pages must be positive"))]
    pub pages: i32,
    /// Selected genre ids
    pub genre_ids: Vec<i32>,
}

/// Fields accepted when updating a book (the cover is not editable here)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub description: String,
    #[validate(range(min = 0, max = 2100, message = "Year out of range"))]
    pub year: i32,
    #[validate(length(min = 1, message = "Publisher must not be empty"))]
    pub publisher: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    #[validate(range(min = 1, message = "Pages must be positive"))]
    pub pages: i32,
    pub genre_ids: Vec<i32>,
}

/// Detail page payload: the book plus everything its view needs
#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    /// Description rendered as safe HTML
    pub description_html: String,
    pub genres: Vec<Genre>,
    pub cover: Option<Cover>,
    pub reviews: Vec<ReviewWithAuthor>,
    /// The viewing user's own review, if any
    pub user_review: Option<ReviewWithAuthor>,
    /// The viewing user's collections, for the add-to-collection control
    pub my_collections: Vec<Collection>,
}
