//! `reddit` - terminal front end for the Reddit clone feed.
//!
//! ```bash
//! reddit feed --topic golang
//! reddit post --title "Hello" --subreddit golang
//! reddit subreddit golang
//! ```

mod config;
mod notifier;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use reddit_core::{
    Anonymous, Feed, GraphQLBackend, GraphQLClient, Identity, PostForm, PostSubmission, RedditApi,
    StaticIdentity, SubmissionError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::notifier::TerminalNotifier;

#[derive(Parser)]
#[command(name = "reddit", version, about = "Browse and post to the Reddit clone feed")]
struct Cli {
    /// GraphQL endpoint (overrides REDDIT_GRAPHQL_URL)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Post as this user (overrides REDDIT_USERNAME)
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the post feed
    Feed {
        /// Only show posts from this subreddit
        #[arg(long)]
        topic: Option<String>,

        /// Ask the server to filter instead of filtering locally
        #[arg(long, requires = "topic")]
        server_filter: bool,
    },

    /// Create a post, creating the subreddit if it does not exist
    Post {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        body: Option<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,

        /// Target subreddit topic
        #[arg(long)]
        subreddit: Option<String>,

        /// Post from inside this subreddit; takes precedence over --subreddit
        #[arg(long = "in", value_name = "TOPIC")]
        context: Option<String>,

        /// Never prompt for missing fields
        #[arg(long)]
        no_input: bool,
    },

    /// Look up subreddits by exact topic
    Subreddit { topic: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,reddit_core=info,reddit_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env(cli.endpoint, cli.user)?;
    tracing::debug!(
        endpoint = %config.graphql_url,
        signed_in = config.username.is_some(),
        "Loaded configuration"
    );

    let mut client = match config.http_timeout {
        Some(timeout) => GraphQLClient::with_timeout(&config.graphql_url, timeout)
            .context("Failed to build HTTP client")?,
        None => GraphQLClient::new(&config.graphql_url),
    };
    if let Some(key) = &config.api_key {
        client = client.with_api_key(key);
    }
    let api: Arc<dyn RedditApi> = Arc::new(GraphQLBackend::new(client));

    let identity: Arc<dyn Identity> = match &config.username {
        Some(name) => Arc::new(StaticIdentity::new(name)),
        None => Arc::new(Anonymous),
    };

    match cli.command {
        Commands::Feed {
            topic,
            server_filter,
        } => show_feed(api, topic, server_filter).await,
        Commands::Post {
            title,
            body,
            image,
            subreddit,
            context,
            no_input,
        } => {
            let form = PostForm {
                title: title.unwrap_or_default(),
                body: body.unwrap_or_default(),
                image: image.unwrap_or_default(),
                subreddit: subreddit.unwrap_or_default(),
            };
            create_post(api, identity, form, context, !no_input).await
        }
        Commands::Subreddit { topic } => show_subreddits(api, &topic).await,
    }
}

async fn show_feed(
    api: Arc<dyn RedditApi>,
    topic: Option<String>,
    server_filter: bool,
) -> Result<ExitCode> {
    let posts = match (&topic, server_filter) {
        (Some(topic), true) => api.list_posts_by_topic(topic).await,
        _ => Feed::new(api).posts(topic.as_deref()).await,
    }
    .context("Failed to load posts")?;

    if posts.is_empty() {
        println!("{}", "No posts yet.".dimmed());
        return Ok(ExitCode::SUCCESS);
    }

    let now = chrono::Utc::now();
    for post in &posts {
        println!("{}\n", render::post_card(post, now));
    }
    Ok(ExitCode::SUCCESS)
}

async fn create_post(
    api: Arc<dyn RedditApi>,
    identity: Arc<dyn Identity>,
    mut form: PostForm,
    context: Option<String>,
    interactive: bool,
) -> Result<ExitCode> {
    let signed_in = identity.is_signed_in();
    let mut workflow = PostSubmission::new(api, identity, Arc::new(TerminalNotifier::new()));
    if let Some(topic) = context {
        workflow = workflow.in_subreddit(topic);
    }

    if interactive && signed_in {
        prompt_missing_fields(&workflow, &mut form)?;
    }

    let target = workflow
        .context_subreddit()
        .map(str::to_string)
        .unwrap_or_else(|| form.subreddit.trim().to_string());

    match workflow.submit(&mut form).await {
        Ok(post) => {
            println!("{} r/{} (post {})", "Posted to".bright_green(), target, post.id);
            Ok(ExitCode::SUCCESS)
        }
        Err(SubmissionError::Validation(e)) => {
            eprintln!("{} {}", "✗".bright_red().bold(), e.to_string().bright_red());
            Ok(ExitCode::from(2))
        }
        // Already reported through the notifier and logged
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

/// Prompt for fields the flags left empty.
///
/// Body and image are only offered when the title was typed interactively.
fn prompt_missing_fields(workflow: &PostSubmission, form: &mut PostForm) -> Result<()> {
    let theme = ColorfulTheme::default();

    let ask_optional = form.title.trim().is_empty();
    if ask_optional {
        form.title = Input::<String>::with_theme(&theme)
            .with_prompt(workflow.placeholder())
            .allow_empty(true)
            .interact_text()?;
    }

    if workflow.context_subreddit().is_none() && form.subreddit.trim().is_empty() {
        form.subreddit = Input::<String>::with_theme(&theme)
            .with_prompt("Sub Reddit (i.e. reactjs)")
            .allow_empty(true)
            .interact_text()?;
    }

    if ask_optional && form.body.is_empty() {
        form.body = Input::<String>::with_theme(&theme)
            .with_prompt("Body (optional)")
            .allow_empty(true)
            .interact_text()?;
    }

    if ask_optional && form.image.is_empty() {
        form.image = Input::<String>::with_theme(&theme)
            .with_prompt("Image URL (optional)")
            .allow_empty(true)
            .interact_text()?;
    }

    Ok(())
}

async fn show_subreddits(api: Arc<dyn RedditApi>, topic: &str) -> Result<ExitCode> {
    let subreddits = api
        .subreddits_by_topic(topic)
        .await
        .with_context(|| format!("Failed to look up r/{}", topic))?;

    if subreddits.is_empty() {
        println!("{}", format!("r/{} does not exist yet", topic).dimmed());
        return Ok(ExitCode::FAILURE);
    }

    for subreddit in &subreddits {
        println!("{}", render::subreddit_line(subreddit));
    }
    Ok(ExitCode::SUCCESS)
}
