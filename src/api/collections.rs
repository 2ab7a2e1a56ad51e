//! Personal collection endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookListEntry,
        collection::{AddToCollection, Collection, CollectionSummary, CreateCollection},
    },
};

use super::CurrentUser;

/// Collection detail response
#[derive(Serialize, ToSchema)]
pub struct CollectionDetailResponse {
    pub id: i32,
    pub name: String,
    pub user_id: i32,
    pub books: Vec<BookListEntry>,
}

/// The current user's collections with book counts
#[utoipa::path(
    get,
    path = "/collections",
    tag = "collections",
    security(("session" = [])),
    responses(
        (status = 200, description = "Own collections", body = Vec<CollectionSummary>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_collections(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<CollectionSummary>>> {
    let collections = state.services.collections.list(user.id).await?;
    Ok(Json(collections))
}

/// Create a collection owned by the current user
#[utoipa::path(
    post,
    path = "/collections",
    tag = "collections",
    security(("session" = [])),
    request_body = CreateCollection,
    responses(
        (status = 201, description = "Collection created", body = Collection),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_collection(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateCollection>,
) -> AppResult<(StatusCode, Json<Collection>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let collection = state
        .services
        .collections
        .create(&request.name, user.id)
        .await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

/// Collection detail with member books; owner only
#[utoipa::path(
    get,
    path = "/collections/{id}",
    tag = "collections",
    security(("session" = [])),
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection detail", body = CollectionDetailResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn get_collection(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<CollectionDetailResponse>> {
    let (collection, books) = state.services.collections.detail(id, user.id).await?;
    Ok(Json(CollectionDetailResponse {
        id: collection.id,
        name: collection.name,
        user_id: collection.user_id,
        books,
    }))
}

/// Add a book to one of the current user's collections
#[utoipa::path(
    post,
    path = "/collections/{id}/books",
    tag = "collections",
    security(("session" = [])),
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    request_body = AddToCollection,
    responses(
        (status = 201, description = "Book added"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Collection or book not found"),
        (status = 409, description = "Book already in the collection")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(request): Json<AddToCollection>,
) -> AppResult<StatusCode> {
    state
        .services
        .collections
        .add_book(id, request.book_id, user.id)
        .await?;
    Ok(StatusCode::CREATED)
}
