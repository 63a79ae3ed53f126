//! Plain-text post cards.

use chrono::{DateTime, Utc};
use colored::Colorize;
use reddit_core::display::{avatar_url, time_ago};
use reddit_core::{Post, Subreddit};

/// Render one post the way the feed shows it.
pub fn post_card(post: &Post, now: DateTime<Utc>) -> String {
    let topic = post.topic().unwrap_or("unknown");
    let posted = post
        .created_at_utc()
        .map(|at| time_ago(at, now))
        .unwrap_or_else(|| post.created_at.clone());

    let mut lines = vec![
        format!(
            "{}  Posted by u/{} {}",
            format!("r/{}", topic).bold(),
            post.username,
            posted.dimmed()
        ),
        format!("  {}", post.title.bold()),
    ];

    if let Some(body) = post.body.as_deref().filter(|b| !b.is_empty()) {
        lines.push(format!("  {}", body));
    }
    if let Some(image) = post.image_url() {
        lines.push(format!("  {}", image.underline()));
    }

    let comments = post.comment_count();
    lines.push(format!(
        "  ▲ {} ▼   {} {}",
        post.score(),
        comments,
        if comments == 1 { "Comment" } else { "Comments" }
    ));

    lines.join("\n")
}

pub fn subreddit_line(subreddit: &Subreddit) -> String {
    format!(
        "r/{}  id={}  created {}\n  {}",
        subreddit.topic.bold(),
        subreddit.id,
        subreddit.created_at,
        avatar_url(&subreddit.topic).dimmed()
    )
}
