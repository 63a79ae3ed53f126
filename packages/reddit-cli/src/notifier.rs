//! Terminal notifications for the submission workflow.

use std::sync::atomic::{AtomicU64, Ordering};

use colored::Colorize;
use reddit_core::{NotificationId, Notifier};

/// Prints progress lines to stderr.
#[derive(Default)]
pub struct TerminalNotifier {
    next_id: AtomicU64,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for TerminalNotifier {
    fn loading(&self, message: &str) -> NotificationId {
        eprintln!("{} {}", "…".bright_yellow(), message);
        NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn success(&self, _id: NotificationId, message: &str) {
        eprintln!("{} {}", "✓".bright_green().bold(), message.bright_green());
    }

    fn error(&self, _id: NotificationId, message: &str) {
        eprintln!("{} {}", "✗".bright_red().bold(), message.bright_red());
    }
}
