//! Authentication and identity service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Role, SessionClaims, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by login and password and issue a session token.
    ///
    /// The failure message does not distinguish a missing user from a wrong
    /// password. `remember` extends the token lifetime past the browser
    /// session.
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
        remember: bool,
    ) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_login(login)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid login or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid login or password".to_string()));
        }

        let token = self.issue_token(&user, remember)?;
        Ok((token, user))
    }

    /// Sign a session token for the given user
    pub fn issue_token(&self, user: &User, remember: bool) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let lifetime = if remember {
            self.config.remember_days as i64 * 86_400
        } else {
            self.config.session_hours as i64 * 3_600
        };

        let claims = SessionClaims {
            sub: user.login.clone(),
            user_id: user.id,
            exp: now + lifetime,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Resolve a session token to a stored user. An invalid token or a
    /// lookup miss both leave the caller unauthenticated.
    pub async fn resolve(&self, token: &str) -> AppResult<User> {
        let claims = SessionClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        self.repository
            .users
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AppError::Authentication("Session user no longer exists".to_string()))
    }

    /// Verify a password against the stored argon2 digest
    pub fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid stored password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Hash a password for storage
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Create the initial accounts when the users table is empty: one per
    /// role, each with its login as password. Runs once at startup; the
    /// default credentials are meant to be changed immediately on a real
    /// deployment.
    pub async fn ensure_bootstrap_accounts(&self) -> AppResult<()> {
        if self.repository.users.count().await? > 0 {
            return Ok(());
        }

        let accounts = [
            ("admin", Role::Admin, "Site", "Administrator"),
            ("moderator", Role::Moderator, "Site", "Moderator"),
            ("reader", Role::Member, "Demo", "Reader"),
        ];

        for (login, role, first_name, last_name) in accounts {
            let hash = self.hash_password(login)?;
            self.repository
                .users
                .create(login, &hash, role, first_name, last_name, None)
                .await?;
        }

        tracing::warn!("Created bootstrap accounts (admin/moderator/reader) - change their passwords");
        Ok(())
    }
}
