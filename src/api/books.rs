//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookDetail, BookListEntry, BookQuery, CreateBook, UpdateBook},
        genre::Genre,
    },
    policy::Action,
    services::{catalog, covers::UploadedCover},
};

use super::CurrentUser;

/// Paginated listing response
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<BookListEntry>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub has_next: bool,
}

/// List books, 10 per page, newest publication year first
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("session" = [])),
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)")
    ),
    responses(
        (status = 200, description = "One page of the catalog", body = BookListResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BookListResponse>> {
    user.require(Action::Show, None)?;

    let page = query.page.unwrap_or(1).max(1);
    let (books, total) = state.services.catalog.list_page(page).await?;

    Ok(Json(BookListResponse {
        books,
        total,
        page,
        per_page: catalog::PER_PAGE,
        has_next: catalog::has_next(total, page),
    }))
}

/// Book detail view
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("session" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetail),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    user.require(Action::Show, None)?;

    let detail = state.services.catalog.get_detail(id, &user).await?;
    Ok(Json(detail))
}

/// Create a book from a multipart form (fields plus an optional cover file)
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("session" = [])),
    request_body(content = CreateBook, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not permitted"),
        (status = 422, description = "Storage failure")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Book>)> {
    user.require(Action::Create, None)?;

    let mut form = CreateBook::default();
    let mut cover: Option<UploadedCover> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = text(field).await?,
            "description" => form.description = text(field).await?,
            "year" => form.year = int(&text(field).await?, "year")?,
            "publisher" => form.publisher = text(field).await?,
            "author" => form.author = text(field).await?,
            "pages" => form.pages = int(&text(field).await?, "pages")?,
            "genres" => {
                let id = int(&text(field).await?, "genres")?;
                form.genre_ids.push(id);
            }
            "cover" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Malformed cover upload: {}", e)))?;
                // An empty file input still submits the field
                if !bytes.is_empty() {
                    cover = Some(UploadedCover {
                        file_name,
                        mime_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let book = state.services.catalog.create_book(form, cover).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book and replace its genre set
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("session" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 403, description = "Not permitted"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Storage failure; original data unchanged")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    let existing = state.services.catalog.get_book(id).await?;
    user.require(Action::Edit, Some(&existing))?;

    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = state.services.catalog.update_book(id, request).await?;
    Ok(Json(updated))
}

/// Delete a book with its reviews, genre links and orphaned cover
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("session" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 403, description = "Not permitted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let existing = state.services.catalog.get_book(id).await?;
    user.require(Action::Delete, Some(&existing))?;

    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Genre list (add/edit form support data)
#[utoipa::path(
    get,
    path = "/genres",
    tag = "books",
    security(("session" = [])),
    responses(
        (status = 200, description = "All genres", body = Vec<Genre>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<Genre>>> {
    user.require(Action::Show, None)?;

    let genres = state.services.catalog.list_genres().await?;
    Ok(Json(genres))
}

async fn text(field: axum_extra::extract::multipart::Field) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart field: {}", e)))
}

fn int(value: &str, field: &str) -> AppResult<i32> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Field '{}' must be a number", field)))
}
