//! Feed aggregation over the follow graph and the itinerary store
//!
//! All three feeds share one ordering contract: creation timestamp
//! descending, ties broken by id descending. The followed feed is a
//! single query over own plus followed itineraries, so rows are
//! deduplicated by construction.

use common::pagination::{Page, PageRequest};
use sqlx::SqlitePool;

use crate::error::ApiResult;
use crate::models::Itinerary;

/// Feed repository
#[derive(Clone)]
pub struct FeedRepository {
    pool: SqlitePool,
}

impl FeedRepository {
    /// Create a new feed repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Itineraries of the user and everyone they follow, newest first
    ///
    /// Always includes the user's own itineraries, even with no follows.
    pub async fn followed_itineraries(
        &self,
        user_id: i64,
        request: PageRequest,
    ) -> ApiResult<Page<Itinerary>> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT count(*)
            FROM itineraries
            WHERE user_id = $1
               OR user_id IN (SELECT followed_id FROM followers WHERE follower_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, Itinerary>(
            r#"
            SELECT id, name, timestamp, user_id, city, picture
            FROM itineraries
            WHERE user_id = $1
               OR user_id IN (SELECT followed_id FROM followers WHERE follower_id = $1)
            ORDER BY timestamp DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(items, request, total))
    }

    /// All itineraries regardless of follow state, newest first
    pub async fn explore(&self, request: PageRequest) -> ApiResult<Page<Itinerary>> {
        let total: i64 = sqlx::query_scalar("SELECT count(*) FROM itineraries")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Itinerary>(
            r#"
            SELECT id, name, timestamp, user_id, city, picture
            FROM itineraries
            ORDER BY timestamp DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(items, request, total))
    }

    /// One user's itineraries, newest first
    pub async fn user_itineraries(
        &self,
        user_id: i64,
        request: PageRequest,
    ) -> ApiResult<Page<Itinerary>> {
        let total: i64 = sqlx::query_scalar("SELECT count(*) FROM itineraries WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Itinerary>(
            r#"
            SELECT id, name, timestamp, user_id, city, picture
            FROM itineraries
            WHERE user_id = $1
            ORDER BY timestamp DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(items, request, total))
    }
}
