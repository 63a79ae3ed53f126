//! In-memory backend for testing and development.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::error::{ApiError, Result};
use crate::traits::api::RedditApi;
use crate::types::{Comment, Id, NewPost, Post, Subreddit, Vote};

/// In-memory storage for subreddits and posts.
///
/// Rows keep insertion order, which is the order lookups return them in.
/// Like the hosted API, nothing stops two subreddits sharing a topic.
pub struct MemoryBackend {
    subreddits: RwLock<Vec<Subreddit>>,
    posts: RwLock<Vec<Post>>,
    next_id: AtomicU64,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> ApiError {
    ApiError::Backend("memory backend lock poisoned".into())
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            subreddits: RwLock::new(Vec::new()),
            posts: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seed a subreddit.
    pub fn with_subreddit(self, topic: impl Into<String>) -> Self {
        let subreddit = self.new_subreddit(topic.into());
        self.subreddits
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subreddit);
        self
    }

    fn allocate_id(&self) -> Id {
        Id::from(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn now() -> String {
        Utc::now().to_rfc3339()
    }

    fn new_subreddit(&self, topic: String) -> Subreddit {
        Subreddit {
            id: self.allocate_id(),
            topic,
            created_at: Self::now(),
        }
    }

    /// Snapshot of every stored subreddit.
    pub fn subreddits(&self) -> Vec<Subreddit> {
        self.subreddits
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot of every stored post, without embedded relations.
    pub fn posts(&self) -> Vec<Post> {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subreddit_count(&self) -> usize {
        self.subreddits
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn post_count(&self) -> usize {
        self.posts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Attach a comment to an existing post.
    pub fn add_comment(&self, post_id: &Id, username: &str, text: &str) -> Result<Comment> {
        let comment = Comment {
            id: self.allocate_id(),
            post_id: post_id.clone(),
            text: text.to_string(),
            username: username.to_string(),
            created_at: Self::now(),
        };
        let mut posts = self.posts.write().map_err(poisoned)?;
        let post = posts
            .iter_mut()
            .find(|p| &p.id == post_id)
            .ok_or_else(|| ApiError::Backend(format!("post {} not found", post_id)))?;
        post.comment_list.push(comment.clone());
        Ok(comment)
    }

    /// Record a vote on an existing post.
    pub fn add_vote(&self, post_id: &Id, username: &str, upvote: bool) -> Result<Vote> {
        let vote = Vote {
            id: self.allocate_id(),
            post_id: post_id.clone(),
            upvote,
            username: username.to_string(),
            created_at: Self::now(),
        };
        let mut posts = self.posts.write().map_err(poisoned)?;
        let post = posts
            .iter_mut()
            .find(|p| &p.id == post_id)
            .ok_or_else(|| ApiError::Backend(format!("post {} not found", post_id)))?;
        post.vote_list.push(vote.clone());
        Ok(vote)
    }

    /// Posts with their subreddit embedded, as the list queries return them.
    fn joined_posts(&self, topic: Option<&str>) -> Result<Vec<Post>> {
        let subreddits = self.subreddits.read().map_err(poisoned)?;
        let posts = self.posts.read().map_err(poisoned)?;

        Ok(posts
            .iter()
            .map(|p| {
                let mut post = p.clone();
                post.subreddit = subreddits.iter().find(|s| s.id == p.subreddit_id).cloned();
                post
            })
            .filter(|p| topic.map_or(true, |t| p.topic() == Some(t)))
            .collect())
    }
}

#[async_trait]
impl RedditApi for MemoryBackend {
    async fn subreddits_by_topic(&self, topic: &str) -> Result<Vec<Subreddit>> {
        Ok(self
            .subreddits
            .read()
            .map_err(poisoned)?
            .iter()
            .filter(|s| s.topic == topic)
            .cloned()
            .collect())
    }

    async fn create_subreddit(&self, topic: &str) -> Result<Subreddit> {
        let subreddit = self.new_subreddit(topic.to_string());
        self.subreddits
            .write()
            .map_err(poisoned)?
            .push(subreddit.clone());
        Ok(subreddit)
    }

    async fn create_post(&self, new_post: &NewPost) -> Result<Post> {
        let known = self
            .subreddits
            .read()
            .map_err(poisoned)?
            .iter()
            .any(|s| s.id == new_post.subreddit_id);
        if !known {
            return Err(ApiError::Backend(format!(
                "subreddit {} does not exist",
                new_post.subreddit_id
            )));
        }

        let post = Post {
            id: self.allocate_id(),
            title: new_post.title.clone(),
            body: Some(new_post.body.clone()),
            image: Some(new_post.image.clone()),
            subreddit_id: new_post.subreddit_id.clone(),
            username: new_post.username.clone(),
            created_at: Self::now(),
            subreddit: None,
            comment_list: Vec::new(),
            vote_list: Vec::new(),
        };
        self.posts.write().map_err(poisoned)?.push(post.clone());
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.joined_posts(None)
    }

    async fn list_posts_by_topic(&self, topic: &str) -> Result<Vec<Post>> {
        self.joined_posts(Some(topic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(subreddit_id: &Id, title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            body: String::new(),
            image: String::new(),
            subreddit_id: subreddit_id.clone(),
            username: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn lookup_is_exact_and_case_sensitive() {
        let backend = MemoryBackend::new().with_subreddit("rust");

        assert_eq!(backend.subreddits_by_topic("rust").await.unwrap().len(), 1);
        assert!(backend.subreddits_by_topic("Rust").await.unwrap().is_empty());
        assert!(backend.subreddits_by_topic("rus").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_topics_are_allowed_and_ordered() {
        let backend = MemoryBackend::new();
        let first = backend.create_subreddit("golang").await.unwrap();
        let second = backend.create_subreddit("golang").await.unwrap();

        let found = backend.subreddits_by_topic("golang").await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, first.id);
        assert_eq!(found[1].id, second.id);
    }

    #[tokio::test]
    async fn create_post_requires_existing_subreddit() {
        let backend = MemoryBackend::new();
        let err = backend
            .create_post(&new_post(&Id::from(99u64), "orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Backend(_)));
        assert_eq!(backend.post_count(), 0);
    }

    #[tokio::test]
    async fn list_posts_embeds_relations() {
        let backend = MemoryBackend::new();
        let sub = backend.create_subreddit("rust").await.unwrap();
        let post = backend.create_post(&new_post(&sub.id, "hi")).await.unwrap();
        backend.add_comment(&post.id, "bob", "welcome").unwrap();
        backend.add_vote(&post.id, "bob", true).unwrap();

        let posts = backend.list_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].topic(), Some("rust"));
        assert_eq!(posts[0].comment_count(), 1);
        assert_eq!(posts[0].score(), 1);

        assert_eq!(backend.list_posts_by_topic("rust").await.unwrap().len(), 1);
        assert!(backend.list_posts_by_topic("go").await.unwrap().is_empty());
    }
}
