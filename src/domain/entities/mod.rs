//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A slug → target URL mapping
//! - [`Capabilities`] - What a requester is allowed to mutate
//!
//! Creation input is modelled separately ([`NewUrlRecord`]) so that store-assigned
//! fields (`id`, `created_at`) can never be supplied by callers.

pub mod capabilities;
pub mod url_record;

pub use capabilities::{Capabilities, Capability};
pub use url_record::{NewUrlRecord, UrlRecord};
