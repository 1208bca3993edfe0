//! Repository implementations.
//!
//! PostgreSQL implementations use SQLx prepared statements; the in-memory ones
//! back the service when no database is configured and keep handler tests
//! self-contained.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] / [`InMemoryUrlRepository`] - Url record storage
//! - [`PgTokenRepository`] / [`InMemoryTokenRepository`] - API token storage

pub mod memory_token_repository;
pub mod memory_url_repository;
pub mod pg_token_repository;
pub mod pg_url_repository;

pub use memory_token_repository::InMemoryTokenRepository;
pub use memory_url_repository::InMemoryUrlRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_url_repository::PgUrlRepository;
