//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod graphql;
pub mod health;
pub mod redirect;
pub mod slugs;
pub mod urls;

pub use graphql::{graphiql_handler, graphql_handler};
pub use health::health_handler;
pub use redirect::{not_found_handler, redirect_handler, root_handler};
pub use slugs::generate_slug_handler;
pub use urls::{create_url_handler, delete_url_handler, get_url_handler};
