//! GraphQL mutation definitions

pub const ADD_SUBREDDIT: &str = r#"
  mutation InsertSubreddit($topic: String!) {
    insertSubreddit(topic: $topic) {
      id
      topic
      created_at
    }
  }
"#;

pub const ADD_POST: &str = r#"
  mutation InsertPost(
    $body: String!
    $image: String!
    $subreddit_id: ID!
    $title: String!
    $username: String!
  ) {
    insertPost(
      body: $body
      image: $image
      subreddit_id: $subreddit_id
      title: $title
      username: $username
    ) {
      body
      created_at
      id
      image
      subreddit_id
      title
      username
    }
  }
"#;
