use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::RegisterPayload;
use crate::error::{Error, Result};
use crate::models::user::{User, USER_COLUMNS};
use crate::utils::crypto::{hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Username and email uniqueness is enforced by the store; a clash comes
    /// back as `DuplicateUnique` naming the field.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<User> {
        let password_hash = hash_password(&payload.password)?;
        let sql = format!(
            "INSERT INTO users (username, full_name, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&payload.username)
            .bind(&payload.full_name)
            .bind(&payload.email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "recruiter registered");
        Ok(user)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match user {
            Some(user) if verify_password(password, &user.password_hash) => Ok(user),
            _ => {
                tracing::warn!("login rejected: invalid credentials");
                Err(Error::InvalidCredentials)
            }
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let user = self.find_by_id(user_id).await?.ok_or(Error::AuthRequired)?;
        if !verify_password(current_password, &user.password_hash) {
            return Err(Error::InvalidCredentials);
        }

        let password_hash = hash_password(new_password)?;
        sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(user_id = %user_id, "password changed");
        Ok(())
    }
}
