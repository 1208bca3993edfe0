//! Business logic services for the application layer.

pub mod auth_service;
pub mod redirect_service;
pub mod slug_validator;
pub mod url_service;

pub use auth_service::AuthService;
pub use redirect_service::{RedirectOutcome, RedirectService};
pub use slug_validator::UniqueSlugValidator;
pub use url_service::{CreateUrl, MutationResult, UrlService};
