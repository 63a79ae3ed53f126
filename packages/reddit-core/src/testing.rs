//! Testing utilities including mock implementations.
//!
//! These let applications exercise the submission workflow without a
//! GraphQL server.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{ApiError, Result};
use crate::traits::{
    api::RedditApi,
    notify::{NotificationId, Notifier},
};
use crate::types::{Id, NewPost, Post, Subreddit};

/// Record of a call made to the mock API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockApiCall {
    SubredditsByTopic { topic: String },
    CreateSubreddit { topic: String },
    CreatePost { post: NewPost },
    ListPosts,
    ListPostsByTopic { topic: String },
}

/// A scriptable `RedditApi`.
///
/// Lookups return the seeded subreddits; creates succeed with generated ids
/// unless a failure was configured for that step. Every call is recorded.
#[derive(Default)]
pub struct MockApi {
    subreddits: Arc<RwLock<Vec<Subreddit>>>,
    posts: Arc<RwLock<Vec<Post>>>,
    lookup_error: Option<String>,
    create_subreddit_error: Option<String>,
    create_post_error: Option<String>,
    list_error: Option<String>,
    next_id: AtomicU64,
    calls: Arc<RwLock<Vec<MockApiCall>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(100),
            ..Default::default()
        }
    }

    /// Seed a subreddit returned by lookups for its topic.
    pub fn with_subreddit(self, id: impl Into<Id>, topic: impl Into<String>) -> Self {
        self.subreddits.write().unwrap().push(Subreddit {
            id: id.into(),
            topic: topic.into(),
            created_at: "2022-10-01T12:00:00+00:00".into(),
        });
        self
    }

    /// Seed the post list returned by the list queries.
    pub fn with_posts(self, posts: Vec<Post>) -> Self {
        *self.posts.write().unwrap() = posts;
        self
    }

    pub fn fail_lookup(mut self, message: impl Into<String>) -> Self {
        self.lookup_error = Some(message.into());
        self
    }

    pub fn fail_create_subreddit(mut self, message: impl Into<String>) -> Self {
        self.create_subreddit_error = Some(message.into());
        self
    }

    pub fn fail_create_post(mut self, message: impl Into<String>) -> Self {
        self.create_post_error = Some(message.into());
        self
    }

    pub fn fail_list(mut self, message: impl Into<String>) -> Self {
        self.list_error = Some(message.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockApiCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of subreddits created through the mock.
    pub fn created_subreddits(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockApiCall::CreateSubreddit { .. }))
            .count()
    }

    /// Number of posts created through the mock.
    pub fn created_posts(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockApiCall::CreatePost { .. }))
            .count()
    }

    fn record(&self, call: MockApiCall) {
        self.calls.write().unwrap().push(call);
    }

    fn fail_if(configured: &Option<String>) -> Result<()> {
        match configured {
            Some(message) => Err(ApiError::Backend(message.clone())),
            None => Ok(()),
        }
    }

    fn allocate_id(&self) -> Id {
        Id::from(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

#[async_trait]
impl RedditApi for MockApi {
    async fn subreddits_by_topic(&self, topic: &str) -> Result<Vec<Subreddit>> {
        self.record(MockApiCall::SubredditsByTopic {
            topic: topic.to_string(),
        });
        Self::fail_if(&self.lookup_error)?;

        Ok(self
            .subreddits
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.topic == topic)
            .cloned()
            .collect())
    }

    async fn create_subreddit(&self, topic: &str) -> Result<Subreddit> {
        self.record(MockApiCall::CreateSubreddit {
            topic: topic.to_string(),
        });
        Self::fail_if(&self.create_subreddit_error)?;

        let subreddit = Subreddit {
            id: self.allocate_id(),
            topic: topic.to_string(),
            created_at: "2022-10-01T12:00:00+00:00".into(),
        };
        self.subreddits.write().unwrap().push(subreddit.clone());
        Ok(subreddit)
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        self.record(MockApiCall::CreatePost { post: post.clone() });
        Self::fail_if(&self.create_post_error)?;

        Ok(Post {
            id: self.allocate_id(),
            title: post.title.clone(),
            body: Some(post.body.clone()),
            image: Some(post.image.clone()),
            subreddit_id: post.subreddit_id.clone(),
            username: post.username.clone(),
            created_at: "2022-10-01T12:00:00+00:00".into(),
            subreddit: None,
            comment_list: vec![],
            vote_list: vec![],
        })
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.record(MockApiCall::ListPosts);
        Self::fail_if(&self.list_error)?;
        Ok(self.posts.read().unwrap().clone())
    }

    async fn list_posts_by_topic(&self, topic: &str) -> Result<Vec<Post>> {
        self.record(MockApiCall::ListPostsByTopic {
            topic: topic.to_string(),
        });
        Self::fail_if(&self.list_error)?;
        Ok(self
            .posts
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.topic() == Some(topic))
            .cloned()
            .collect())
    }
}

/// What a `RecordingNotifier` saw, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Loading(String),
    Success(String),
    Error(String),
}

/// Notifier that keeps every event for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    events: RwLock<Vec<(NotificationId, NotificationEvent)>>,
    next_id: AtomicU64,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events
            .read()
            .unwrap()
            .iter()
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// Events with the notification they belong to.
    pub fn events_with_ids(&self) -> Vec<(NotificationId, NotificationEvent)> {
        self.events.read().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn loading(&self, message: &str) -> NotificationId {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.events
            .write()
            .unwrap()
            .push((id, NotificationEvent::Loading(message.to_string())));
        id
    }

    fn success(&self, id: NotificationId, message: &str) {
        self.events
            .write()
            .unwrap()
            .push((id, NotificationEvent::Success(message.to_string())));
    }

    fn error(&self, id: NotificationId, message: &str) {
        self.events
            .write()
            .unwrap()
            .push((id, NotificationEvent::Error(message.to_string())));
    }
}
