//! Common library for the Ajorni application
//!
//! This crate provides shared functionality used across the Ajorni
//! itinerary service, including database connectivity, error handling,
//! and page-based pagination primitives.

pub mod database;
pub mod error;
pub mod pagination;
