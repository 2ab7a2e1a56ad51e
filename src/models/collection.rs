//! Personal collection model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A user-owned named grouping of books
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Collection {
    pub id: i32,
    pub name: String,
    pub user_id: i32,
}

/// Collection list entry with its member count
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CollectionSummary {
    pub id: i32,
    pub name: String,
    pub book_count: i64,
}

/// Create collection request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCollection {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: String,
}

/// Add a book into a collection
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCollection {
    pub book_id: i32,
}
