//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::gravatar;

/// User entity
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub about_me: Option<String>,
    pub last_seen: DateTime<Utc>,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Profile update payload
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    pub username: String,
    pub about_me: Option<String>,
}

/// User login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Response for user operations
///
/// Never carries the password hash; the avatar URL is derived from the
/// email at response time.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub about_me: Option<String>,
    pub last_seen: DateTime<Utc>,
    pub avatar_url: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let avatar_url = gravatar::avatar_url(&user.email, gravatar::DEFAULT_AVATAR_SIZE);
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            about_me: user.about_me,
            last_seen: user.last_seen,
            avatar_url,
        }
    }
}
