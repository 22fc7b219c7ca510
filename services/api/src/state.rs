//! Application state shared across handlers

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::repositories::{FeedRepository, FollowRepository, ItineraryRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub follow_repository: FollowRepository,
    pub itinerary_repository: ItineraryRepository,
    pub feed_repository: FeedRepository,
}

impl AppState {
    /// Build the application state over a connection pool
    pub fn new(pool: SqlitePool, jwt_service: JwtService) -> Self {
        AppState {
            user_repository: UserRepository::new(pool.clone()),
            follow_repository: FollowRepository::new(pool.clone()),
            itinerary_repository: ItineraryRepository::new(pool.clone()),
            feed_repository: FeedRepository::new(pool.clone()),
            db_pool: pool,
            jwt_service,
        }
    }
}
