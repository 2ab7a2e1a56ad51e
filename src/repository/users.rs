//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Find user by ID, returning None on a miss
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.login, u.password_hash, r.name AS role,
                   u.first_name, u.last_name, u.middle_name, u.created_at
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by login (primary authentication lookup)
    pub async fn get_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.login, u.password_hash, r.name AS role,
                   u.first_name, u.last_name, u.middle_name, u.created_at
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE LOWER(u.login) = LOWER($1)
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Total number of user accounts
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a new user with an already-hashed password
    pub async fn create(
        &self,
        login: &str,
        password_hash: &str,
        role: Role,
        first_name: &str,
        last_name: &str,
        middle_name: Option<&str>,
    ) -> AppResult<User> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (login, password_hash, role_id, first_name, last_name, middle_name)
            VALUES ($1, $2, (SELECT id FROM roles WHERE name = $3), $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(login)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(first_name)
        .bind(last_name)
        .bind(middle_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Login is already taken"))?;

        self.get_by_id(id).await
    }
}
