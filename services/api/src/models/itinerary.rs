//! Itinerary model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Itinerary entity
///
/// `user_id` is nullable: rows imported from older data may predate
/// owner tracking, and the feed treats such rows as ownerless.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Itinerary {
    pub id: i64,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<i64>,
    pub city: String,
    pub picture: Option<String>,
}

/// Itinerary creation payload
///
/// `picture` is an opaque reference to an already-stored upload; this
/// service never touches the file itself.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItinerary {
    pub name: String,
    pub city: String,
    pub picture: Option<String>,
}
