//! Input validation utilities
//!
//! Field bounds follow the persisted schema: username 64, email 120,
//! about_me 140, itinerary/activity name 32, city 32, description 140.

use regex::Regex;
use std::sync::OnceLock;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if username.len() > 64 {
        return Err("Username must be at most 64 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 120 {
        return Err("Email must be at most 120 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate the optional "about me" profile text
pub fn validate_about_me(about_me: &str) -> Result<(), String> {
    if about_me.len() > 140 {
        return Err("About me must be at most 140 characters long".to_string());
    }

    Ok(())
}

/// Validate an itinerary or activity name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Name is required".to_string());
    }

    if name.len() > 32 {
        return Err("Name must be at most 32 characters long".to_string());
    }

    Ok(())
}

/// Validate an itinerary city
pub fn validate_city(city: &str) -> Result<(), String> {
    if city.is_empty() {
        return Err("City is required".to_string());
    }

    if city.len() > 32 {
        return Err("City must be at most 32 characters long".to_string());
    }

    Ok(())
}

/// Validate an activity description
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.len() > 140 {
        return Err("Description must be at most 140 characters long".to_string());
    }

    Ok(())
}
