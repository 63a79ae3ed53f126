//! Formatting helpers for rendering posts.

use chrono::{DateTime, Utc};

const AVATAR_BASE_URL: &str = "https://avatars.dicebear.com/api/open-peeps";

/// Seeded avatar image for a subreddit topic or user name.
pub fn avatar_url(seed: &str) -> String {
    let seed = if seed.is_empty() { "placeholder" } else { seed };
    format!("{}/{}.svg", AVATAR_BASE_URL, seed)
}

/// Relative time such as "5 minutes ago".
///
/// Timestamps in the future render as "just now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    const UNITS: [(i64, &str); 6] = [
        (365 * 24 * 3600, "year"),
        (30 * 24 * 3600, "month"),
        (7 * 24 * 3600, "week"),
        (24 * 3600, "day"),
        (3600, "hour"),
        (60, "minute"),
    ];

    let (size, unit) = UNITS
        .iter()
        .copied()
        .find(|(size, _)| seconds >= *size)
        .unwrap_or((60, "minute"));

    let count = seconds / size;
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
