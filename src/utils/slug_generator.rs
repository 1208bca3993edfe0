//! Random slug generation.
//!
//! Slugs are drawn from `[A-Za-z0-9]` and always start with a letter, so they
//! are valid URL path segments without escaping and never look like numeric ids.
//! Generation does not guarantee uniqueness; callers run the result through
//! [`crate::application::services::UniqueSlugValidator`] or simply submit it and
//! let the store reject collisions.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Length used when the caller does not ask for a specific one.
pub const DEFAULT_SLUG_LENGTH: usize = 10;

/// Upper bound for generated slugs, matching the `slug` column width.
pub const MAX_SLUG_LENGTH: usize = 255;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random slug of exactly `length` characters using the thread-local RNG.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `length` is 0 or exceeds [`MAX_SLUG_LENGTH`].
///
/// # Examples
///
/// ```
/// use tinyurl::utils::slug_generator::generate_slug;
///
/// let slug = generate_slug(10).unwrap();
/// assert_eq!(slug.len(), 10);
/// assert!(slug.chars().next().unwrap().is_ascii_alphabetic());
/// ```
pub fn generate_slug(length: usize) -> Result<String, AppError> {
    generate_slug_with(&mut rand::rng(), length)
}

/// Generates a slug from an explicit random source.
///
/// # Errors
///
/// See [`generate_slug`].
pub fn generate_slug_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Result<String, AppError> {
    if length == 0 || length > MAX_SLUG_LENGTH {
        return Err(AppError::bad_request(
            format!("Slug length must be between 1 and {}", MAX_SLUG_LENGTH),
            json!({ "provided_length": length }),
        ));
    }

    let mut slug = String::with_capacity(length);
    slug.push(pick(rng, LETTERS));
    slug.extend((1..length).map(|_| pick(rng, ALPHANUMERIC)));

    Ok(slug)
}

fn pick<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8]) -> char {
    alphabet[rng.random_range(0..alphabet.len())] as char
}
