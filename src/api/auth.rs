//! Authentication endpoints

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User},
};

use super::{CurrentUser, SESSION_COOKIE};

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
    /// Keep the session past the browser session
    #[serde(default)]
    pub remember: bool,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user: UserInfo,
}

/// Public identity payload
#[derive(Serialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub login: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.id,
            login: user.login.clone(),
            role: user.role,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            middle_name: user.middle_name.clone(),
        }
    }
}

/// Authenticate and establish a session
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let (token, user) = state
        .services
        .auth
        .authenticate(&request.login, &request.password, request.remember)
        .await?;

    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token
    );
    if request.remember {
        let max_age = state.config.auth.remember_days * 86_400;
        cookie.push_str(&format!("; Max-Age={}", max_age));
    }
    let cookie = Cookie::parse(cookie)
        .map_err(|e| AppError::Internal(format!("Failed to build session cookie: {}", e)))?;

    let body = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        user: UserInfo::from(&user),
    };

    Ok((jar.add(cookie), Json(body)))
}

/// Tear down the session
#[utoipa::path(
    get,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cleared")
    )
)]
pub async fn logout(jar: CookieJar) -> AppResult<(CookieJar, Json<serde_json::Value>)> {
    // Expire the cookie regardless of whether a session existed
    let cookie = Cookie::parse(format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    ))
    .map_err(|e| AppError::Internal(format!("Failed to build session cookie: {}", e)))?;

    Ok((jar.add(cookie), Json(serde_json::json!({ "status": "logged_out" }))))
}

/// Current identity
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("session" = [])),
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(CurrentUser(user): CurrentUser) -> AppResult<Json<UserInfo>> {
    Ok(Json(UserInfo::from(&user)))
}
