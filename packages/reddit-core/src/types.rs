//! Type definitions for GraphQL API responses
//!
//! Field names follow the backing schema: scalar columns are snake_case
//! (`created_at`, `subreddit_id`), relation lists are camelCase (`commentList`).

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque backend identifier.
///
/// The API returns ids as strings or as integers depending on the resolver;
/// both are accepted and the id is always sent back as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Str(String),
            Int(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Str(s) => Id(s),
            RawId::Int(n) => Id(n.to_string()),
        })
    }
}

// ============================================================================
// Subreddit Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subreddit {
    pub id: Id,
    pub topic: String,
    pub created_at: String,
}

// ============================================================================
// Post Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Id,
    pub post_id: Id,
    pub text: String,
    pub username: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub id: Id,
    pub post_id: Id,
    pub upvote: bool,
    pub username: String,
    pub created_at: String,
}

/// A post as returned by the API.
///
/// `subreddit`, `comment_list` and `vote_list` are only populated by the list
/// queries; the insert mutation returns the bare row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub subreddit_id: Id,
    pub username: String,
    pub created_at: String,
    #[serde(default)]
    pub subreddit: Option<Subreddit>,
    #[serde(rename = "commentList", default, deserialize_with = "null_as_empty")]
    pub comment_list: Vec<Comment>,
    #[serde(rename = "voteList", default, deserialize_with = "null_as_empty")]
    pub vote_list: Vec<Vote>,
}

/// Resolvers return `null` for a relation with no rows.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Post {
    /// Topic of the embedded subreddit, if the query fetched it.
    pub fn topic(&self) -> Option<&str> {
        self.subreddit.as_ref().map(|s| s.topic.as_str())
    }

    pub fn comment_count(&self) -> usize {
        self.comment_list.len()
    }

    /// Upvotes minus downvotes.
    pub fn score(&self) -> i64 {
        self.vote_list
            .iter()
            .map(|v| if v.upvote { 1 } else { -1 })
            .sum()
    }

    /// Image URL, treating the empty string the API stores as "no image".
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.is_empty())
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 and the zone-less `YYYY-MM-DDTHH:MM:SS[.f]` form Postgres
/// emits for `timestamp` columns (interpreted as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Fields sent to the insert-post mutation.
///
/// Serialized directly as the mutation variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub image: String,
    pub subreddit_id: Id,
    pub username: String,
}

// ============================================================================
// GraphQL Response Wrappers
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct GetSubredditListByTopicResponse {
    #[serde(rename = "getSubredditListByTopic")]
    pub subreddits: Option<Vec<Subreddit>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertSubredditResponse {
    #[serde(rename = "insertSubreddit")]
    pub subreddit: Subreddit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertPostResponse {
    #[serde(rename = "insertPost")]
    pub post: Post,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetPostListResponse {
    #[serde(rename = "getPostList")]
    pub posts: Option<Vec<Post>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetPostListByTopicResponse {
    #[serde(rename = "getPostListByTopic")]
    pub posts: Option<Vec<Post>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_accepts_strings_and_integers() {
        let from_str: Id = serde_json::from_value(json!("42")).unwrap();
        let from_int: Id = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(from_str, from_int);
        assert_eq!(serde_json::to_value(&from_int).unwrap(), json!("42"));
    }

    #[test]
    fn list_post_deserializes_embedded_relations() {
        let post: Post = serde_json::from_value(json!({
            "id": 7,
            "title": "Hello",
            "body": "",
            "image": "",
            "username": "alice",
            "created_at": "2022-10-01T12:00:00.000000+00:00",
            "subreddit_id": 3,
            "subreddit": { "id": 3, "topic": "golang", "created_at": "2022-09-30T08:00:00+00:00" },
            "commentList": [
                { "id": 1, "post_id": 7, "text": "nice", "username": "bob", "created_at": "2022-10-01T13:00:00+00:00" }
            ],
            "voteList": [
                { "id": 1, "post_id": 7, "upvote": true, "username": "bob", "created_at": "2022-10-01T13:00:00+00:00" },
                { "id": 2, "post_id": 7, "upvote": true, "username": "carol", "created_at": "2022-10-01T13:00:00+00:00" },
                { "id": 3, "post_id": 7, "upvote": false, "username": "dave", "created_at": "2022-10-01T13:00:00+00:00" }
            ]
        }))
        .unwrap();

        assert_eq!(post.topic(), Some("golang"));
        assert_eq!(post.comment_count(), 1);
        assert_eq!(post.score(), 1);
        assert_eq!(post.image_url(), None);
        assert!(post.created_at_utc().is_some());
    }

    #[test]
    fn inserted_post_has_no_relations() {
        let post: Post = serde_json::from_value(json!({
            "id": "9",
            "title": "Bare",
            "body": null,
            "image": "https://img.example/cat.png",
            "username": "alice",
            "created_at": "2022-10-01 12:00:00",
            "subreddit_id": "3"
        }))
        .unwrap();

        assert_eq!(post.topic(), None);
        assert_eq!(post.score(), 0);
        assert_eq!(post.image_url(), Some("https://img.example/cat.png"));
        assert!(post.created_at_utc().is_some());
    }

    #[test]
    fn null_relation_lists_are_empty() {
        let post: Post = serde_json::from_value(json!({
            "id": 4,
            "title": "Quiet",
            "username": "alice",
            "created_at": "2022-10-01T12:00:00+00:00",
            "subreddit_id": 3,
            "commentList": null,
            "voteList": null
        }))
        .unwrap();

        assert!(post.comment_list.is_empty());
        assert_eq!(post.comment_count(), 0);
        assert_eq!(post.score(), 0);
    }

    #[test]
    fn null_list_responses_deserialize() {
        let resp: GetSubredditListByTopicResponse =
            serde_json::from_value(json!({ "getSubredditListByTopic": null })).unwrap();
        assert!(resp.subreddits.is_none());
    }
}
