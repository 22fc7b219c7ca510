//! Itinerary and activity repository

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{Activity, Itinerary, NewActivity, NewItinerary, UpdateActivity};

/// Itinerary repository
#[derive(Clone)]
pub struct ItineraryRepository {
    pool: SqlitePool,
}

impl ItineraryRepository {
    /// Create a new itinerary repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an itinerary owned by the given user
    pub async fn create(&self, owner_id: i64, new_itinerary: &NewItinerary) -> ApiResult<Itinerary> {
        info!(
            "Creating itinerary '{}' for user {}",
            new_itinerary.name, owner_id
        );

        let itinerary = sqlx::query_as::<_, Itinerary>(
            r#"
            INSERT INTO itineraries (name, timestamp, user_id, city, picture)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, timestamp, user_id, city, picture
            "#,
        )
        .bind(&new_itinerary.name)
        .bind(Utc::now())
        .bind(owner_id)
        .bind(&new_itinerary.city)
        .bind(&new_itinerary.picture)
        .fetch_one(&self.pool)
        .await?;

        Ok(itinerary)
    }

    /// Find an itinerary by ID
    pub async fn find_by_id(&self, id: i64) -> ApiResult<Option<Itinerary>> {
        let itinerary = sqlx::query_as::<_, Itinerary>(
            r#"
            SELECT id, name, timestamp, user_id, city, picture
            FROM itineraries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(itinerary)
    }

    /// Append an activity to an itinerary
    ///
    /// The order key is assigned inside the insert as max(order_id) + 1
    /// over the itinerary, which keeps keys monotonically increasing and
    /// consistent with insertion order.
    pub async fn add_activity(
        &self,
        itinerary_id: i64,
        new_activity: &NewActivity,
    ) -> ApiResult<Activity> {
        if self.find_by_id(itinerary_id).await?.is_none() {
            return Err(ApiError::NotFound("Itinerary"));
        }

        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (name, timestamp, itinerary_id, description, order_id)
            VALUES (
                $1, $2, $3, $4,
                (SELECT COALESCE(MAX(order_id), 0) + 1 FROM activities WHERE itinerary_id = $3)
            )
            RETURNING id, name, timestamp, itinerary_id, description, order_id
            "#,
        )
        .bind(&new_activity.name)
        .bind(Utc::now())
        .bind(itinerary_id)
        .bind(&new_activity.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(activity)
    }

    /// Find an activity by ID
    pub async fn find_activity(&self, id: i64) -> ApiResult<Option<Activity>> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, name, timestamp, itinerary_id, description, order_id
            FROM activities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(activity)
    }

    /// Update an activity's name and description in place
    ///
    /// The order key is never touched by edits.
    pub async fn edit_activity(&self, id: i64, update: &UpdateActivity) -> ApiResult<Activity> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            UPDATE activities
            SET name = $1, description = $2
            WHERE id = $3
            RETURNING id, name, timestamp, itinerary_id, description, order_id
            "#,
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ApiError::NotFound("Activity"))?;

        Ok(activity)
    }

    /// All activities of an itinerary in display order
    ///
    /// Ascending by order key; equal keys fall back to insertion order
    /// via the id so the result is deterministic.
    pub async fn activities_ordered(&self, itinerary_id: i64) -> ApiResult<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, name, timestamp, itinerary_id, description, order_id
            FROM activities
            WHERE itinerary_id = $1
            ORDER BY order_id ASC, id ASC
            "#,
        )
        .bind(itinerary_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }
}
