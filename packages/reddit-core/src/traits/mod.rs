//! Collaborator seams for the submission workflow.
//!
//! Applications implement these to plug in a data backend, an identity
//! source and a way to show progress to the user.

pub mod api;
pub mod identity;
pub mod notify;
