//! Integration tests for the post submission workflow.
//!
//! Covers:
//! 1. New topics create exactly one subreddit and one post
//! 2. Existing topics reuse the subreddit
//! 3. Each failing step aborts the rest and leaves the form intact

use std::sync::Arc;

use async_trait::async_trait;
use reddit_core::error::Result as ApiResult;
use reddit_core::testing::{MockApi, MockApiCall, NotificationEvent, RecordingNotifier};
use reddit_core::{
    Feed, MemoryBackend, NewPost, Post, PostForm, PostSubmission, RedditApi, StaticIdentity,
    Subreddit, SubmissionError, SUBMISSION_FAILED_MESSAGE,
};
use tokio::sync::Barrier;

fn workflow(api: Arc<dyn RedditApi>) -> (PostSubmission, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let workflow = PostSubmission::new(api, Arc::new(StaticIdentity::new("alice")), notifier.clone());
    (workflow, notifier)
}

// =============================================================================
// Find-or-create
// =============================================================================

#[tokio::test]
async fn new_topics_get_one_subreddit_each() {
    let backend = Arc::new(MemoryBackend::new());
    let (workflow, _) = workflow(backend.clone());

    for topic in ["golang", "rust", "zig"] {
        let post = workflow
            .submit(&mut PostForm::new(format!("About {topic}"), topic))
            .await
            .unwrap();

        let subs = backend.subreddits_by_topic(topic).await.unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(post.subreddit_id, subs[0].id);
    }

    assert_eq!(backend.subreddit_count(), 3);
    assert_eq!(backend.post_count(), 3);
}

#[tokio::test]
async fn second_post_reuses_subreddit() {
    let backend = Arc::new(MemoryBackend::new());
    let (workflow, _) = workflow(backend.clone());

    let first = workflow
        .submit(&mut PostForm::new("One", "golang"))
        .await
        .unwrap();
    let second = workflow
        .submit(&mut PostForm::new("Two", "golang").with_body("more").with_image("https://img/x.png"))
        .await
        .unwrap();

    assert_eq!(backend.subreddit_count(), 1);
    assert_eq!(first.subreddit_id, second.subreddit_id);
    assert_eq!(second.body.as_deref(), Some("more"));
    assert_eq!(second.image.as_deref(), Some("https://img/x.png"));
}

#[tokio::test]
async fn topic_lookup_is_case_sensitive() {
    let backend = Arc::new(MemoryBackend::new().with_subreddit("Rust"));
    let (workflow, _) = workflow(backend.clone());

    workflow
        .submit(&mut PostForm::new("Hello", "rust"))
        .await
        .unwrap();

    assert_eq!(backend.subreddit_count(), 2);
}

#[tokio::test]
async fn existing_subreddit_skips_create() {
    let api = Arc::new(MockApi::new().with_subreddit(7u64, "golang"));
    let (workflow, _) = workflow(api.clone());

    let post = workflow
        .submit(&mut PostForm::new("Hello", "golang"))
        .await
        .unwrap();

    assert_eq!(post.subreddit_id.as_str(), "7");
    assert_eq!(api.created_subreddits(), 0);
    assert_eq!(api.created_posts(), 1);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn subreddit_create_failure_skips_post() {
    let api = Arc::new(MockApi::new().fail_create_subreddit("insert rejected"));
    let (workflow, notifier) = workflow(api.clone());

    let mut form = PostForm::new("Hello", "golang");
    let err = workflow.submit(&mut form).await.unwrap_err();

    assert!(matches!(err, SubmissionError::CreateSubreddit(_)));
    assert_eq!(api.created_posts(), 0);
    assert_eq!(form.title, "Hello");
    assert_eq!(
        notifier.events(),
        vec![
            NotificationEvent::Loading("Creating new post...".into()),
            NotificationEvent::Error(SUBMISSION_FAILED_MESSAGE.into()),
        ]
    );
}

#[tokio::test]
async fn post_create_failure_leaves_new_subreddit_behind() {
    let api = Arc::new(MockApi::new().fail_create_post("timeout"));
    let (workflow, notifier) = workflow(api.clone());

    let mut form = PostForm::new("Hello", "golang");
    let before = form.clone();
    let err = workflow.submit(&mut form).await.unwrap_err();

    assert!(matches!(err, SubmissionError::CreatePost(_)));
    assert_eq!(err.user_message(), SUBMISSION_FAILED_MESSAGE);
    assert_eq!(form, before);
    assert_eq!(api.created_subreddits(), 1);

    let calls = api.calls();
    assert!(matches!(calls.last(), Some(MockApiCall::CreatePost { .. })));
    assert_eq!(
        notifier.events().last(),
        Some(&NotificationEvent::Error(SUBMISSION_FAILED_MESSAGE.into()))
    );
}

#[tokio::test]
async fn success_closes_the_loading_notification() {
    let api = Arc::new(MockApi::new());
    let (workflow, notifier) = workflow(api);

    workflow
        .submit(&mut PostForm::new("Hello", "golang"))
        .await
        .unwrap();

    let events = notifier.events_with_ids();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].0, events[1].0);
}

#[tokio::test]
async fn feed_refetch_failure_does_not_fail_submission() {
    let api = Arc::new(MockApi::new().fail_list("feed down"));
    let feed = Arc::new(Feed::new(api.clone()));
    let (workflow, notifier) = workflow(api.clone());
    let workflow = workflow.with_feed(feed.clone());

    let mut form = PostForm::new("Hello", "golang");
    workflow.submit(&mut form).await.unwrap();

    assert_eq!(form, PostForm::default());
    assert!(!feed.is_cached().await);
    assert!(matches!(
        notifier.events().last(),
        Some(NotificationEvent::Success(_))
    ));
    assert_eq!(api.calls().last(), Some(&MockApiCall::ListPosts));
}

/// Holds each lookup until the barrier fills, so every submission sees the
/// same lookup result before any of them creates.
struct LookupGate {
    inner: Arc<MemoryBackend>,
    barrier: Barrier,
}

#[async_trait]
impl RedditApi for LookupGate {
    async fn subreddits_by_topic(&self, topic: &str) -> ApiResult<Vec<Subreddit>> {
        let found = self.inner.subreddits_by_topic(topic).await?;
        self.barrier.wait().await;
        Ok(found)
    }

    async fn create_subreddit(&self, topic: &str) -> ApiResult<Subreddit> {
        self.inner.create_subreddit(topic).await
    }

    async fn create_post(&self, post: &NewPost) -> ApiResult<Post> {
        self.inner.create_post(post).await
    }

    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        self.inner.list_posts().await
    }

    async fn list_posts_by_topic(&self, topic: &str) -> ApiResult<Vec<Post>> {
        self.inner.list_posts_by_topic(topic).await
    }
}

#[tokio::test]
async fn overlapping_first_posts_create_duplicate_subreddits() {
    let backend = Arc::new(MemoryBackend::new());
    let gate = Arc::new(LookupGate {
        inner: backend.clone(),
        barrier: Barrier::new(2),
    });
    let (racing, _) = workflow(gate);
    let racing = Arc::new(racing);

    let a = {
        let racing = racing.clone();
        tokio::spawn(async move { racing.submit(&mut PostForm::new("A", "fresh")).await })
    };
    let b = {
        let racing = racing.clone();
        tokio::spawn(async move { racing.submit(&mut PostForm::new("B", "fresh")).await })
    };

    let post_a = a.await.unwrap().unwrap();
    let post_b = b.await.unwrap().unwrap();

    // Both lookups saw no "fresh" subreddit, so both created one
    let subs = backend.subreddits_by_topic("fresh").await.unwrap();
    assert_eq!(subs.len(), 2);
    assert_eq!(backend.post_count(), 2);
    assert_ne!(post_a.subreddit_id, post_b.subreddit_id);
    for post in [&post_a, &post_b] {
        assert!(subs.iter().any(|s| s.id == post.subreddit_id));
    }

    // Later submissions settle on the first one in backend order
    let (ungated, _) = workflow(backend.clone());
    let later = ungated
        .submit(&mut PostForm::new("C", "fresh"))
        .await
        .unwrap();
    assert_eq!(later.subreddit_id, subs[0].id);
    assert_eq!(backend.subreddit_count(), 2);
}
