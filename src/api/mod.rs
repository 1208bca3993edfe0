//! HTTP API layer: redirects, REST endpoints and GraphQL.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`graphql`] - GraphQL schema, object types and resolvers
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Capability resolution, rate limiting and tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod graphql;
pub mod handlers;
pub mod middleware;
pub mod routes;
