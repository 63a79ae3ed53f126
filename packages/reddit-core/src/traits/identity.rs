//! Identity of the acting user.

/// Source of the signed-in user's display name.
pub trait Identity: Send + Sync {
    /// `None` when nobody is signed in.
    fn current_user_display_name(&self) -> Option<String>;

    /// A blank display name counts as signed out.
    fn is_signed_in(&self) -> bool {
        self.current_user_display_name()
            .map_or(false, |name| !name.trim().is_empty())
    }
}

/// A fixed, already-authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    name: String,
}

impl StaticIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Identity for StaticIdentity {
    fn current_user_display_name(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

/// Signed-out session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anonymous;

impl Identity for Anonymous {
    fn current_user_display_name(&self) -> Option<String> {
        None
    }
}
