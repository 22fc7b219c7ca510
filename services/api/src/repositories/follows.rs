//! Follow graph repository
//!
//! Directed edges between users, stored as a plain association table.
//! Both mutations are idempotent at this layer: re-following keeps
//! exactly one edge, re-unfollowing is a no-op. Self-follow is a policy
//! concern of the route layer and never raises here.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::ApiResult;
use crate::models::User;

/// Follow graph repository
#[derive(Clone)]
pub struct FollowRepository {
    pool: SqlitePool,
}

impl FollowRepository {
    /// Create a new follow repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a follow edge if absent
    ///
    /// The composite primary key resolves the duplicate case inside the
    /// storage layer, so a repeated follow never errors.
    pub async fn follow(&self, follower_id: i64, followed_id: i64) -> ApiResult<()> {
        info!("User {} follows user {}", follower_id, followed_id);

        sqlx::query(
            r#"
            INSERT INTO followers (follower_id, followed_id)
            VALUES ($1, $2)
            ON CONFLICT (follower_id, followed_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a follow edge if present
    pub async fn unfollow(&self, follower_id: i64, followed_id: i64) -> ApiResult<()> {
        info!("User {} unfollows user {}", follower_id, followed_id);

        sqlx::query(
            r#"
            DELETE FROM followers
            WHERE follower_id = $1 AND followed_id = $2
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Membership test for a follow edge
    pub async fn is_following(&self, follower_id: i64, followed_id: i64) -> ApiResult<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT count(*)
            FROM followers
            WHERE follower_id = $1 AND followed_id = $2
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// All users the given user follows
    pub async fn followed_users(&self, user_id: i64) -> ApiResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.about_me, u.last_seen
            FROM users u
            JOIN followers f ON f.followed_id = u.id
            WHERE f.follower_id = $1
            ORDER BY u.username ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
