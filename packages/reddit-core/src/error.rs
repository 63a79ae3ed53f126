//! Typed errors for the feed client.
//!
//! Uses `thiserror` for library errors (not `anyhow`). The binary wraps these
//! with `anyhow` context.

use thiserror::Error;

/// Generic message shown to the user when a submission fails in the backend.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Whoops something went wrong";

/// Errors from the data-access layer (GraphQL transport or in-memory backend).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx HTTP response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The server answered with a GraphQL `errors` array
    #[error("GraphQL error: {0}")]
    GraphQL(String),

    /// Neither `data` nor `errors` in the response
    #[error("no data returned")]
    NoData,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by a non-HTTP backend
    #[error("backend error: {0}")]
    Backend(String),
}

/// Missing or unusable form input. Caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("A Post Title is required.")]
    MissingTitle,

    #[error("A SubReddit is required.")]
    MissingSubreddit,

    #[error("sign in to post")]
    NotSignedIn,
}

/// Errors from the post submission workflow.
///
/// Backend variants record which step failed so the log is useful; the user
/// sees the same message for all of them.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("invalid submission: {0}")]
    Validation(#[from] ValidationError),

    #[error("subreddit lookup failed: {0}")]
    Lookup(#[source] ApiError),

    #[error("subreddit creation failed: {0}")]
    CreateSubreddit(#[source] ApiError),

    #[error("post creation failed: {0}")]
    CreatePost(#[source] ApiError),
}

impl SubmissionError {
    /// Message suitable for the user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Validation(e) => e.to_string(),
            _ => SUBMISSION_FAILED_MESSAGE.to_string(),
        }
    }

    /// Whether the failure happened after a network call was issued.
    pub fn is_backend(&self) -> bool {
        !matches!(self, SubmissionError::Validation(_))
    }
}

/// Result type alias for data-access operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Result type alias for the submission workflow.
pub type SubmissionResult<T> = std::result::Result<T, SubmissionError>;
