//! Ajorni itinerary service
//!
//! A small travel-planning service with social features: users register,
//! follow each other, create itineraries composed of ordered activities,
//! and read a feed of itineraries from the people they follow.

pub mod auth;
pub mod error;
pub mod gravatar;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use state::AppState;
