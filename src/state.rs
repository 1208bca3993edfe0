//! Shared application state injected into handlers.

use std::sync::Arc;
use url::Url;

use crate::api::graphql::{UrlSchema, build_schema};
use crate::application::services::{AuthService, RedirectService, UrlService};
use crate::domain::repositories::{TokenRepository, UrlRepository};

/// Services shared by all handlers. Cheap to clone.
///
/// Services are built over trait objects so the storage backend (PostgreSQL
/// or in-memory) is chosen at startup.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
    pub redirect_service: Arc<RedirectService<dyn UrlRepository>>,
    pub auth_service: Arc<AuthService<dyn TokenRepository>>,
    pub schema: UrlSchema,
    /// Where unknown slugs redirect; `None` answers them with a hard 404.
    pub not_found_path: Option<String>,
}

impl AppState {
    /// Wires services over the given repositories.
    ///
    /// # Arguments
    ///
    /// - `origin` - public base URL, used to tell internal targets from external ones
    /// - `token_signing_secret` - HMAC key for bearer token hashing
    /// - `not_found_path` - redirect target for unknown slugs
    pub fn new(
        url_repository: Arc<dyn UrlRepository>,
        token_repository: Arc<dyn TokenRepository>,
        origin: Url,
        token_signing_secret: String,
        not_found_path: Option<String>,
    ) -> Self {
        let url_service = Arc::new(UrlService::new(url_repository.clone()));
        let redirect_service = Arc::new(RedirectService::new(url_repository, origin));
        let auth_service = Arc::new(AuthService::new(token_repository, token_signing_secret));
        let schema = build_schema(url_service.clone());

        Self {
            url_service,
            redirect_service,
            auth_service,
            schema,
            not_found_path,
        }
    }
}
