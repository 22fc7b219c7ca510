//! Repositories for database operations
//!
//! Each repository owns one slice of the data model and returns
//! materialized values, never lazy handles. All methods are a single
//! statement against the pool, so each mutation commits atomically.

pub mod feed;
pub mod follows;
pub mod itineraries;
pub mod users;

pub use feed::FeedRepository;
pub use follows::FollowRepository;
pub use itineraries::ItineraryRepository;
pub use users::UserRepository;
