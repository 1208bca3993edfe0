//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and permission checks. Services consume repository traits and
//! provide a clean API for HTTP and GraphQL handlers.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Url creation, lookup and deletion
//! - [`services::redirect_service::RedirectService`] - Slug to redirect resolution
//! - [`services::slug_validator::UniqueSlugValidator`] - Slug uniqueness checks
//! - [`services::auth_service::AuthService`] - Bearer token to capability mapping

pub mod services;
