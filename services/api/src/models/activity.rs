//! Activity model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Activity entity
///
/// `order_id` determines display order within the owning itinerary and
/// is assigned monotonically at insert time; edits never change it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub itinerary_id: i64,
    pub description: String,
    pub order_id: i64,
}

/// Activity creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewActivity {
    pub name: String,
    pub description: String,
}

/// Activity update payload (name and description only)
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateActivity {
    pub name: String,
    pub description: String,
}
