//! Progress notifications shown while a submission runs.
//!
//! Modelled on toast notifications: `loading` opens one, and `success` or
//! `error` replaces it by id.

/// Handle to an open notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

pub trait Notifier: Send + Sync {
    fn loading(&self, message: &str) -> NotificationId;

    fn success(&self, id: NotificationId, message: &str);

    fn error(&self, id: NotificationId, message: &str);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn loading(&self, _message: &str) -> NotificationId {
        NotificationId(0)
    }

    fn success(&self, _id: NotificationId, _message: &str) {}

    fn error(&self, _id: NotificationId, _message: &str) {}
}
