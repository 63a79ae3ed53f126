//! Post submission workflow.
//!
//! - [`form`] - form values, validation and prompt text
//! - [`submit`] - find-or-create the subreddit, then create the post

pub mod form;
pub mod submit;

pub use form::{PostDraft, PostForm};
pub use submit::{PostSubmission, CREATING_POST_MESSAGE, POST_CREATED_MESSAGE};
