//! Review model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::sanitize;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub rating: i16,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Internal row structure for review-with-author queries
#[derive(Debug, Clone, FromRow)]
pub struct ReviewWithAuthorRow {
    id: i32,
    book_id: i32,
    user_id: i32,
    rating: i16,
    text: String,
    created_at: DateTime<Utc>,
    first_name: String,
    last_name: String,
}

impl From<ReviewWithAuthorRow> for ReviewWithAuthor {
    fn from(row: ReviewWithAuthorRow) -> Self {
        let text_html = sanitize::render(&row.text);
        ReviewWithAuthor {
            id: row.id,
            book_id: row.book_id,
            user_id: row.user_id,
            rating: row.rating,
            text: row.text,
            text_html,
            created_at: row.created_at,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

/// Review joined with the reviewer's display name
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewWithAuthor {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub rating: i16,
    pub text: String,
    /// Review text rendered as safe HTML
    pub text_html: String,
    pub created_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
}

/// Create review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
    pub text: String,
}
