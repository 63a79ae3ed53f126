use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub graphql_url: String,
    pub api_key: Option<String>,
    /// Display name of the signed-in user; `None` means signed out
    pub username: Option<String>,
    pub http_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `endpoint` and `user` come from command-line flags and win over the
    /// environment; the endpoint is only required once both are consulted.
    pub fn from_env(endpoint: Option<String>, user: Option<String>) -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok(), endpoint, user)
    }

    fn from_lookup<F>(lookup: F, endpoint: Option<String>, user: Option<String>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| non_empty(lookup(name));

        Ok(Self {
            graphql_url: non_empty(endpoint)
                .or_else(|| var("REDDIT_GRAPHQL_URL"))
                .context("REDDIT_GRAPHQL_URL must be set (or pass --endpoint)")?,
            api_key: var("REDDIT_API_KEY"),
            username: non_empty(user).or_else(|| var("REDDIT_USERNAME")),
            http_timeout: var("REDDIT_HTTP_TIMEOUT_SECS")
                .map(|secs| secs.trim().parse::<u64>())
                .transpose()
                .context("REDDIT_HTTP_TIMEOUT_SECS must be a whole number of seconds")?
                .map(Duration::from_secs),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn flags_replace_env_values() {
        let config = Config::from_lookup(
            lookup(&[
                ("REDDIT_GRAPHQL_URL", "http://env/graphql"),
                ("REDDIT_USERNAME", "bob"),
            ]),
            Some("http://flag/graphql".into()),
            Some("alice".into()),
        )
        .unwrap();

        assert_eq!(config.graphql_url, "http://flag/graphql");
        assert_eq!(config.username.as_deref(), Some("alice"));
    }

    #[test]
    fn endpoint_flag_alone_is_enough() {
        let config =
            Config::from_lookup(lookup(&[]), Some("http://flag/graphql".into()), None).unwrap();

        assert_eq!(config.graphql_url, "http://flag/graphql");
        assert!(config.username.is_none());
        assert!(config.http_timeout.is_none());
    }

    #[test]
    fn missing_endpoint_is_an_error() {
        let err = Config::from_lookup(lookup(&[]), None, None).unwrap_err();
        assert!(err.to_string().contains("REDDIT_GRAPHQL_URL"));
    }

    #[test]
    fn blank_user_flag_means_signed_out() {
        let config = Config::from_lookup(
            lookup(&[("REDDIT_GRAPHQL_URL", "http://env/graphql")]),
            None,
            Some("   ".into()),
        )
        .unwrap();

        assert!(config.username.is_none());
    }

    #[test]
    fn timeout_is_parsed_in_seconds() {
        let config = Config::from_lookup(
            lookup(&[
                ("REDDIT_GRAPHQL_URL", "http://env/graphql"),
                ("REDDIT_HTTP_TIMEOUT_SECS", "15"),
            ]),
            None,
            None,
        )
        .unwrap();

        assert_eq!(config.http_timeout, Some(Duration::from_secs(15)));
    }
}
