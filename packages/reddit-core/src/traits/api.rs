//! Data-access trait for subreddits and posts.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{NewPost, Post, Subreddit};

/// Query and mutation operations the feed needs from the backend.
#[async_trait]
pub trait RedditApi: Send + Sync {
    /// Subreddits whose topic equals `topic` exactly, in backend order.
    async fn subreddits_by_topic(&self, topic: &str) -> Result<Vec<Subreddit>>;

    /// Create a subreddit. No uniqueness check is performed.
    async fn create_subreddit(&self, topic: &str) -> Result<Subreddit>;

    async fn create_post(&self, post: &NewPost) -> Result<Post>;

    /// Every post, each embedding its subreddit, comments and votes.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Posts belonging to the subreddit named `topic`.
    async fn list_posts_by_topic(&self, topic: &str) -> Result<Vec<Post>>;
}
