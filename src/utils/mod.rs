//! Utility functions for slug generation and redirect target handling.
//!
//! - [`slug_generator`] - Random URL-safe slug generation
//! - [`target_url`] - Internal / external classification of stored targets

pub mod slug_generator;
pub mod target_url;
