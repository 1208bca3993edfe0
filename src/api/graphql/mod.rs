//! GraphQL surface for url queries and mutations.
//!
//! ```graphql
//! type Query {
//!   url(id: ID!): Url
//!   generateSlug(length: Int): String!
//! }
//!
//! type Mutation {
//!   createUrl(data: UrlInput!): UrlResponse!
//!   deleteUrl(id: ID!): UrlResponse!
//! }
//! ```
//!
//! Mutations read the requester's [`crate::domain::entities::Capabilities`]
//! from per-request data, inserted by the HTTP handler.

pub mod schema;
pub mod types;

pub use schema::{MutationRoot, QueryRoot, UrlSchema, build_schema};
