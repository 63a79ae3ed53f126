//! Find-or-create the subreddit, then create the post.

use std::sync::Arc;

use crate::error::{SubmissionError, SubmissionResult};
use crate::feed::Feed;
use crate::traits::{api::RedditApi, identity::Identity, notify::Notifier};
use crate::types::{Id, NewPost, Post};
use crate::workflow::form::{PostDraft, PostForm};

pub const CREATING_POST_MESSAGE: &str = "Creating new post...";
pub const POST_CREATED_MESSAGE: &str = "New post Created!";

/// Submits posts on behalf of one user.
///
/// Backend calls are issued one at a time; each must finish before the next
/// starts. There is no retry and no uniqueness check between the lookup and
/// the create, so two concurrent first posts to the same new topic can each
/// create a subreddit.
pub struct PostSubmission {
    api: Arc<dyn RedditApi>,
    identity: Arc<dyn Identity>,
    notifier: Arc<dyn Notifier>,
    feed: Option<Arc<Feed>>,
    context_subreddit: Option<String>,
}

impl PostSubmission {
    pub fn new(
        api: Arc<dyn RedditApi>,
        identity: Arc<dyn Identity>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            identity,
            notifier,
            feed: None,
            context_subreddit: None,
        }
    }

    /// Refetch this feed after every successful submission.
    pub fn with_feed(mut self, feed: Arc<Feed>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Post into `topic` regardless of what the form says.
    pub fn in_subreddit(mut self, topic: impl Into<String>) -> Self {
        self.context_subreddit = Some(topic.into());
        self
    }

    pub fn context_subreddit(&self) -> Option<&str> {
        self.context_subreddit.as_deref()
    }

    /// Title prompt for the current session and context.
    pub fn placeholder(&self) -> String {
        PostForm::placeholder(self.identity.is_signed_in(), self.context_subreddit())
    }

    /// Validate the form without touching the backend.
    pub fn validate(&self, form: &PostForm) -> SubmissionResult<PostDraft> {
        Ok(form.validate(
            self.context_subreddit(),
            self.identity.current_user_display_name(),
        )?)
    }

    /// Submit the form.
    ///
    /// Validation failures return before any notification or network call.
    /// On success the form is cleared and the feed refetched; on a backend
    /// failure the form is left as it was and the user sees a generic error.
    pub async fn submit(&self, form: &mut PostForm) -> SubmissionResult<Post> {
        let draft = self.validate(form)?;

        let notification = self.notifier.loading(CREATING_POST_MESSAGE);

        match self.publish(&draft).await {
            Ok(post) => {
                form.clear();
                self.notifier.success(notification, POST_CREATED_MESSAGE);
                self.refresh_feed().await;
                Ok(post)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    subreddit = %draft.subreddit,
                    "Post submission failed"
                );
                self.notifier.error(notification, &e.user_message());
                Err(e)
            }
        }
    }

    /// Resolve the subreddit and create the post, without form or
    /// notification side effects.
    pub async fn publish(&self, draft: &PostDraft) -> SubmissionResult<Post> {
        let subreddit_id = self.resolve_subreddit(&draft.subreddit).await?;

        let new_post = NewPost {
            title: draft.title.clone(),
            body: draft.body.clone(),
            image: draft.image.clone(),
            subreddit_id,
            username: draft.author.clone(),
        };

        let post = self
            .api
            .create_post(&new_post)
            .await
            .map_err(SubmissionError::CreatePost)?;

        tracing::info!(
            post_id = %post.id,
            subreddit_id = %post.subreddit_id,
            author = %post.username,
            "Created post"
        );

        Ok(post)
    }

    /// Id of the first subreddit named `topic`, creating one if none exists.
    pub async fn resolve_subreddit(&self, topic: &str) -> SubmissionResult<Id> {
        let existing = self
            .api
            .subreddits_by_topic(topic)
            .await
            .map_err(SubmissionError::Lookup)?;

        if let Some(first) = existing.into_iter().next() {
            tracing::debug!(id = %first.id, topic, "Using existing subreddit");
            return Ok(first.id);
        }

        let created = self
            .api
            .create_subreddit(topic)
            .await
            .map_err(SubmissionError::CreateSubreddit)?;

        tracing::info!(id = %created.id, topic, "Created subreddit");
        Ok(created.id)
    }

    async fn refresh_feed(&self) {
        if let Some(feed) = &self.feed {
            if let Err(e) = feed.refetch().await {
                tracing::warn!(error = %e, "Failed to refetch feed after submission");
                feed.invalidate().await;
            }
        }
    }
}
