//! User repository for database operations

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewUser, UpdateProfile, User};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new user
    ///
    /// Fails with `DuplicateUsername` or `DuplicateEmail` when the
    /// identity collides with an existing user. The pre-checks give the
    /// caller a precise error; the unique constraints catch the race
    /// where two registrations pass the pre-check concurrently.
    pub async fn create(&self, new_user: &NewUser) -> ApiResult<User> {
        info!("Creating new user: {}", new_user.username);

        if self.find_by_username(&new_user.username).await?.is_some() {
            return Err(ApiError::DuplicateUsername);
        }
        if self.find_by_email(&new_user.email).await?.is_some() {
            return Err(ApiError::DuplicateEmail);
        }

        // Hash the password
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(new_user.password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {}", e);
                ApiError::Internal
            })?
            .to_string();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, last_seen)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, about_me, last_seen
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    /// Authenticate a user by username and password
    ///
    /// Fails with `InvalidCredentials` on an unknown username or a hash
    /// mismatch, without revealing which one failed.
    pub async fn authenticate(&self, username: &str, password: &str) -> ApiResult<User> {
        let user = self
            .find_by_username(username)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(&user, password)? {
            return Err(ApiError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i64) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, about_me, last_seen
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, about_me, last_seen
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, about_me, last_seen
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update the last-seen timestamp to now
    ///
    /// Called on every authenticated request.
    pub async fn touch_last_seen(&self, user_id: i64) -> ApiResult<()> {
        sqlx::query("UPDATE users SET last_seen = $1 WHERE id = $2")
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Update a user's profile (username and about_me)
    ///
    /// Fails with `DuplicateUsername` when the new username belongs to a
    /// different user.
    pub async fn update_profile(&self, user_id: i64, update: &UpdateProfile) -> ApiResult<User> {
        if let Some(existing) = self.find_by_username(&update.username).await? {
            if existing.id != user_id {
                return Err(ApiError::DuplicateUsername);
            }
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $1, about_me = $2
            WHERE id = $3
            RETURNING id, username, email, password_hash, about_me, last_seen
            "#,
        )
        .bind(&update.username)
        .bind(&update.about_me)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?
        .ok_or(ApiError::NotFound("User"))?;

        Ok(user)
    }
}

/// Verify a password against a user's stored hash
pub fn verify_password(user: &User, password: &str) -> ApiResult<bool> {
    let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|e| {
        tracing::error!("Failed to parse password hash: {}", e);
        ApiError::Internal
    })?;

    let argon2 = Argon2::default();
    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Map a unique-constraint violation to the matching duplicate error
///
/// Covers the race where two registrations with the same identity pass
/// the pre-checks concurrently and the second insert hits the constraint.
fn map_unique_violation(e: sqlx::Error) -> ApiError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return if db_err.message().contains("users.email") {
                ApiError::DuplicateEmail
            } else {
                ApiError::DuplicateUsername
            };
        }
    }
    e.into()
}
