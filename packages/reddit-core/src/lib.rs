//! Reddit clone feed client
//!
//! Data layer for a Reddit-style feed backed by a hosted GraphQL API.
//! The centrepiece is the post submission workflow: find the target
//! subreddit by topic (creating it when missing), then create the post.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reddit_core::{
//!     GraphQLBackend, GraphQLClient, PostForm, PostSubmission, SilentNotifier, StaticIdentity,
//! };
//!
//! let client = GraphQLClient::new("https://example.stepzen.net/api/reddit/__graphql")
//!     .with_api_key("secret");
//! let api = Arc::new(GraphQLBackend::new(client));
//!
//! let workflow = PostSubmission::new(api, Arc::new(StaticIdentity::new("alice")), Arc::new(SilentNotifier));
//! let mut form = PostForm::new("Hello", "golang");
//! let post = workflow.submit(&mut form).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator seams (RedditApi, Identity, Notifier)
//! - [`types`] - API data types
//! - [`graphql`] - GraphQL transport and documents
//! - [`backends`] - RedditApi implementations (GraphQL, memory)
//! - [`workflow`] - Post form and submission pipeline
//! - [`feed`] - Topic filter and cached post list
//! - [`display`] - Relative time and avatar helpers
//! - [`testing`] - Mock implementations for testing

pub mod backends;
pub mod display;
pub mod error;
pub mod feed;
pub mod graphql;
pub mod testing;
pub mod traits;
pub mod types;
pub mod workflow;

pub use backends::{GraphQLBackend, MemoryBackend};
pub use error::{ApiError, SubmissionError, ValidationError, SUBMISSION_FAILED_MESSAGE};
pub use feed::{filter_by_topic, Feed};
pub use graphql::GraphQLClient;
pub use traits::{
    api::RedditApi,
    identity::{Anonymous, Identity, StaticIdentity},
    notify::{NotificationId, Notifier, SilentNotifier},
};
pub use types::{Comment, Id, NewPost, Post, Subreddit, Vote};
pub use workflow::{PostDraft, PostForm, PostSubmission};
