//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, collections, health, reviews};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "1.0.0",
        description = "Library Catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::logout,
        auth::me,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::list_genres,
        // Reviews
        reviews::list_reviews,
        reviews::create_review,
        // Collections
        collections::list_collections,
        collections::create_collection,
        collections::get_collection,
        collections::add_book,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            crate::models::user::Role,
            // Books
            crate::models::book::Book,
            crate::models::book::BookListEntry,
            crate::models::book::BookDetail,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::genre::Genre,
            crate::models::cover::Cover,
            books::BookListResponse,
            // Reviews
            crate::models::review::Review,
            crate::models::review::ReviewWithAuthor,
            crate::models::review::CreateReview,
            // Collections
            crate::models::collection::Collection,
            crate::models::collection::CollectionSummary,
            crate::models::collection::CreateCollection,
            crate::models::collection::AddToCollection,
            collections::CollectionDetailResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "reviews", description = "Book reviews"),
        (name = "collections", description = "Personal collections")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
