//! API handlers for Libris REST endpoints

pub mod auth;
pub mod books;
pub mod collections;
pub mod health;
pub mod openapi;
pub mod reviews;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{error::AppError, models::user::User, AppState};

/// Name of the session cookie carrying the signed token
pub const SESSION_COOKIE: &str = "libris_session";

/// Extractor resolving the session to a stored user.
///
/// The token is read from the session cookie, falling back to an
/// `Authorization: Bearer` header for API clients. A missing or invalid
/// token, or a user that no longer exists, rejects with 401.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get(AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.strip_prefix("Bearer "))
                    .map(|token| token.to_string())
            })
            .ok_or_else(|| AppError::Authentication("Missing session token".to_string()))?;

        let user = state.services.auth.resolve(&token).await?;
        Ok(CurrentUser(user))
    }
}
