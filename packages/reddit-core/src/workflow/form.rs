//! Post form values and validation.

use crate::error::ValidationError;

/// Values collected by the "create post" form.
///
/// `body` and `image` may be left empty. When the form is shown inside a
/// subreddit, that subreddit replaces whatever is in `subreddit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub body: String,
    pub image: String,
    pub subreddit: String,
}

/// A validated submission, ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub image: String,
    /// Topic of the target subreddit
    pub subreddit: String,
    /// Display name of the author
    pub author: String,
}

impl PostForm {
    pub fn new(title: impl Into<String>, subreddit: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subreddit: subreddit.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Reset every field, as after a successful submission.
    pub fn clear(&mut self) {
        self.title.clear();
        self.body.clear();
        self.image.clear();
        self.subreddit.clear();
    }

    /// Check required fields and build the draft.
    ///
    /// `context_subreddit` overrides the typed subreddit. Whitespace-only
    /// values count as missing. Title, subreddit and image are trimmed; the
    /// body is sent as typed.
    pub fn validate(
        &self,
        context_subreddit: Option<&str>,
        author: Option<String>,
    ) -> Result<PostDraft, ValidationError> {
        let author = author
            .filter(|a| !a.trim().is_empty())
            .ok_or(ValidationError::NotSignedIn)?;

        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let subreddit = context_subreddit
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.subreddit.trim());
        if subreddit.is_empty() {
            return Err(ValidationError::MissingSubreddit);
        }

        Ok(PostDraft {
            title: title.to_string(),
            body: self.body.clone(),
            image: self.image.trim().to_string(),
            subreddit: subreddit.to_string(),
            author,
        })
    }

    /// Prompt shown in the empty title field.
    pub fn placeholder(signed_in: bool, context_subreddit: Option<&str>) -> String {
        match (signed_in, context_subreddit) {
            (false, _) => "sign in to post".to_string(),
            (true, Some(sub)) => format!("Create a post in r/{}", sub),
            (true, None) => "Create a post by entering a title!".to_string(),
        }
    }
}
