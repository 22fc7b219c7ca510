//! Itinerary service models

pub mod activity;
pub mod itinerary;
pub mod user;

// Re-export for convenience
pub use activity::{Activity, NewActivity, UpdateActivity};
pub use itinerary::{Itinerary, NewItinerary};
pub use user::{LoginCredentials, NewUser, UpdateProfile, User, UserResponse};
