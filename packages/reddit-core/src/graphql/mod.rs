//! GraphQL transport and the operation documents the feed uses

mod client;
mod mutations;
mod queries;

pub use client::*;
pub use mutations::*;
pub use queries::*;
