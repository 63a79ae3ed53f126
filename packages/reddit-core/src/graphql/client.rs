//! GraphQL client for making requests to the API server

use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// GraphQL request body
#[derive(Debug, Serialize)]
pub struct GraphQLRequest<V: Serialize> {
    pub query: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<V>,
}

/// GraphQL response wrapper
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

/// GraphQL error
#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    pub locations: Option<Vec<GraphQLErrorLocation>>,
    pub path: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLErrorLocation {
    pub line: i32,
    pub column: i32,
}

/// GraphQL client for making requests
#[derive(Clone)]
pub struct GraphQLClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GraphQLClient {
    /// Create a new GraphQL client
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
        })
    }

    /// Send `Authorization: apikey <key>` with every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a GraphQL query
    pub async fn query<V, R>(&self, query: &'static str, variables: Option<V>) -> Result<R>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        let request = GraphQLRequest { query, variables };

        let mut req = self.client.post(&self.endpoint).json(&request);

        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("apikey {}", key));
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("HTTP error");
            let message = match response.text().await {
                Ok(body) if !body.trim().is_empty() => body,
                Ok(_) => reason.to_string(),
                Err(e) => {
                    tracing::debug!(status = status.as_u16(), error = %e, "Failed to read error body");
                    format!("{} (body unreadable: {})", reason, e)
                }
            };
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let graphql_response: GraphQLResponse<R> = serde_json::from_slice(&body)?;

        if let Some(errors) = graphql_response.errors {
            if let Some(first_error) = errors.first() {
                tracing::debug!(
                    count = errors.len(),
                    message = %first_error.message,
                    "GraphQL response carried errors"
                );
                return Err(ApiError::GraphQL(first_error.message.clone()));
            }
        }

        graphql_response.data.ok_or(ApiError::NoData)
    }

    /// Execute a GraphQL mutation (same as query, but semantically different)
    pub async fn mutate<V, R>(&self, mutation: &'static str, variables: Option<V>) -> Result<R>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        self.query(mutation, variables).await
    }
}
