//! Post feed: topic filtering and a cached post list.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::Result;
use crate::traits::api::RedditApi;
use crate::types::Post;

/// Keep only posts whose subreddit topic equals `topic` exactly.
///
/// `None` returns the list untouched. Relative order is preserved and nothing
/// is deduplicated.
pub fn filter_by_topic(posts: Vec<Post>, topic: Option<&str>) -> Vec<Post> {
    match topic {
        None => posts,
        Some(topic) => posts
            .into_iter()
            .filter(|p| p.topic() == Some(topic))
            .collect(),
    }
}

/// Lazily fetched list of all posts.
///
/// The first read fetches from the backend; later reads are served from the
/// cache until [`Feed::invalidate`] or [`Feed::refetch`].
pub struct Feed {
    api: Arc<dyn RedditApi>,
    cache: RwLock<Option<Vec<Post>>>,
}

impl Feed {
    pub fn new(api: Arc<dyn RedditApi>) -> Self {
        Self {
            api,
            cache: RwLock::new(None),
        }
    }

    /// Cached posts, optionally narrowed to one topic.
    pub async fn posts(&self, topic: Option<&str>) -> Result<Vec<Post>> {
        if let Some(posts) = self.cache.read().await.as_ref() {
            return Ok(filter_by_topic(posts.clone(), topic));
        }

        let posts = self.refetch().await?;
        Ok(filter_by_topic(posts, topic))
    }

    /// Fetch the list again and replace the cache.
    pub async fn refetch(&self) -> Result<Vec<Post>> {
        let posts = self.api.list_posts().await?;
        tracing::debug!(count = posts.len(), "Fetched post list");
        *self.cache.write().await = Some(posts.clone());
        Ok(posts)
    }

    /// Drop the cache so the next read goes to the backend.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    pub async fn is_cached(&self) -> bool {
        self.cache.read().await.is_some()
    }
}
