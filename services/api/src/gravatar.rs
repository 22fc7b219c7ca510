//! Gravatar URL construction
//!
//! Builds the external avatar URL from an MD5 digest of the lower-cased
//! email address. The algorithm is fixed by the gravatar contract; this
//! is not a security-sensitive use of MD5. No network call happens here,
//! only URL construction.

use md5::{Digest, Md5};

/// Default avatar edge length in pixels
pub const DEFAULT_AVATAR_SIZE: u32 = 128;

/// Compute the avatar URL for an email address
///
/// Deterministic and case-insensitive: the same email in any casing
/// yields the same URL.
pub fn avatar_url(email: &str, size: u32) -> String {
    let digest = Md5::digest(email.to_lowercase().as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?d=identicon&s={}",
        hex::encode(digest),
        size
    )
}
