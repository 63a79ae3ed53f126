//! `RedditApi` over the hosted GraphQL endpoint.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::graphql::{
    GraphQLClient, ADD_POST, ADD_SUBREDDIT, GET_ALL_POSTS, GET_ALL_POSTS_BY_TOPIC,
    GET_SUBREDDIT_BY_TOPIC,
};
use crate::traits::api::RedditApi;
use crate::types::{
    GetPostListByTopicResponse, GetPostListResponse, GetSubredditListByTopicResponse,
    InsertPostResponse, InsertSubredditResponse, NewPost, Post, Subreddit,
};

#[derive(Serialize)]
struct TopicVariables<'a> {
    topic: &'a str,
}

#[derive(Clone)]
pub struct GraphQLBackend {
    client: GraphQLClient,
}

impl GraphQLBackend {
    pub fn new(client: GraphQLClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GraphQLClient {
        &self.client
    }
}

#[async_trait]
impl RedditApi for GraphQLBackend {
    async fn subreddits_by_topic(&self, topic: &str) -> Result<Vec<Subreddit>> {
        let resp: GetSubredditListByTopicResponse = self
            .client
            .query(GET_SUBREDDIT_BY_TOPIC, Some(TopicVariables { topic }))
            .await?;
        Ok(resp.subreddits.unwrap_or_default())
    }

    async fn create_subreddit(&self, topic: &str) -> Result<Subreddit> {
        let resp: InsertSubredditResponse = self
            .client
            .mutate(ADD_SUBREDDIT, Some(TopicVariables { topic }))
            .await?;
        tracing::debug!(id = %resp.subreddit.id, topic, "Inserted subreddit");
        Ok(resp.subreddit)
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let resp: InsertPostResponse = self.client.mutate(ADD_POST, Some(post)).await?;
        tracing::debug!(id = %resp.post.id, subreddit_id = %post.subreddit_id, "Inserted post");
        Ok(resp.post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let resp: GetPostListResponse = self.client.query(GET_ALL_POSTS, None::<()>).await?;
        Ok(resp.posts.unwrap_or_default())
    }

    async fn list_posts_by_topic(&self, topic: &str) -> Result<Vec<Post>> {
        let resp: GetPostListByTopicResponse = self
            .client
            .query(GET_ALL_POSTS_BY_TOPIC, Some(TopicVariables { topic }))
            .await?;
        Ok(resp.posts.unwrap_or_default())
    }
}
