//! `RedditApi` implementations.
//!
//! Available backends:
//! - `GraphQLBackend` - the hosted GraphQL API
//! - `MemoryBackend` - in-memory storage for development and tests

pub mod graphql;
pub mod memory;

pub use graphql::GraphQLBackend;
pub use memory::MemoryBackend;
