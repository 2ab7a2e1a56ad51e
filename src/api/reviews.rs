//! Review endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::review::{CreateReview, Review, ReviewWithAuthor},
};

use super::CurrentUser;

/// Reviews for a book, with reviewer names
#[utoipa::path(
    get,
    path = "/books/{id}/reviews",
    tag = "reviews",
    security(("session" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Reviews for the book", body = Vec<ReviewWithAuthor>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_reviews(
    State(state): State<crate::AppState>,
    CurrentUser(_user): CurrentUser,
    Path(book_id): Path<i32>,
) -> AppResult<Json<Vec<ReviewWithAuthor>>> {
    let reviews = state.services.reviews.list_for_book(book_id).await?;
    Ok(Json(reviews))
}

/// Post a review; one per user per book
#[utoipa::path(
    post,
    path = "/books/{id}/reviews",
    tag = "reviews",
    security(("session" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 404, description = "Book not found"),
        (status = 409, description = "User already reviewed this book")
    )
)]
pub async fn create_review(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<i32>,
    Json(request): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let review = state.services.reviews.add(book_id, user.id, request).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
