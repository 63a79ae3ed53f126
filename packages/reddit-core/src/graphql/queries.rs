//! GraphQL query definitions

pub const GET_SUBREDDIT_BY_TOPIC: &str = r#"
  query GetSubredditListByTopic($topic: String!) {
    getSubredditListByTopic(topic: $topic) {
      id
      topic
      created_at
    }
  }
"#;

pub const GET_ALL_POSTS: &str = r#"
  query GetPostList {
    getPostList {
      body
      created_at
      id
      image
      title
      username
      commentList {
        created_at
        id
        post_id
        text
        username
      }
      subreddit {
        created_at
        id
        topic
      }
      voteList {
        created_at
        id
        post_id
        upvote
        username
      }
      subreddit_id
    }
  }
"#;

pub const GET_ALL_POSTS_BY_TOPIC: &str = r#"
  query GetPostListByTopic($topic: String!) {
    getPostListByTopic(topic: $topic) {
      body
      created_at
      id
      image
      title
      username
      commentList {
        created_at
        id
        post_id
        text
        username
      }
      subreddit {
        created_at
        id
        topic
      }
      voteList {
        created_at
        id
        post_id
        upvote
        username
      }
      subreddit_id
    }
  }
"#;
