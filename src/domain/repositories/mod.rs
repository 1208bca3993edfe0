//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by the infrastructure layer.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - Url record storage, lookup by id/slug, deletion
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! Mock implementations are auto-generated via `mockall` for unit tests; see
//! `tests/repository_*.rs` for storage-level tests.

pub mod token_repository;
pub mod url_repository;

pub use token_repository::{ApiToken, TokenRepository};
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
