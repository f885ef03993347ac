use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ghfeed::activity::{FeedClient, card_for, normalize};
use ghfeed::app::event_loop::{self, WatchOptions};
use ghfeed::blog::BlogClient;
use ghfeed::github::{GithubEventsClient, auth};
use ghfeed::server::{self, ProxyState};
use ghfeed::util::config::AppConfig;
use ghfeed::util::time::relative_time_str;

#[derive(Parser, Debug)]
#[command(name = "ghfeed", version, about = "GitHub activity proxy and terminal feed")]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the activity proxy HTTP server
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:3000
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Watch a user's activity in the terminal, refreshing periodically
    Watch {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Fetch activity once through the proxy and print it
    Show {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print normalized items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read posts from the blog content store
    Blog {
        #[command(subcommand)]
        command: BlogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum BlogCommand {
    /// List posts, newest first
    List,
    /// Print a single post
    Show { slug: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { bind } => {
            setup_stderr_logging(if cli.debug { "ghfeed=debug" } else { "ghfeed=info" });
            run_serve(&config, bind).await
        }
        Command::Watch { username, limit } => {
            let _guard = setup_file_logging(&config, cli.debug)?;
            let options = WatchOptions {
                username: username.unwrap_or_else(|| config.activity.username.clone()),
                limit: limit.unwrap_or(config.activity.limit),
                refresh_interval: Duration::from_secs(config.activity.refresh_interval_secs.max(1)),
            };
            let client = FeedClient::new(&config.activity.proxy_url)?;
            info!("ghfeed watch starting");
            event_loop::run(client, options).await
        }
        Command::Show {
            username,
            limit,
            json,
        } => {
            setup_stderr_logging(if cli.debug { "ghfeed=debug" } else { "ghfeed=warn" });
            let username = username.unwrap_or_else(|| config.activity.username.clone());
            let limit = limit.unwrap_or(config.activity.limit);
            run_show(&config, &username, limit, json).await
        }
        Command::Blog { command } => {
            setup_stderr_logging(if cli.debug { "ghfeed=debug" } else { "ghfeed=warn" });
            run_blog(&config, command).await
        }
    }
}

async fn run_serve(config: &AppConfig, bind: Option<String>) -> Result<()> {
    let addr = match bind {
        Some(bind) => bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind))?,
        None => config.proxy.bind_addr()?,
    };

    let token = auth::resolve_token();
    let source = GithubEventsClient::new(&config.github.api_url, token)?;
    info!(
        authenticated = source.is_authenticated(),
        api_url = %config.github.api_url,
        "Upstream configured"
    );

    let mut state = ProxyState::new(Arc::new(source));
    state.default_username = config.proxy.default_username.clone();
    state.default_limit = config.proxy.default_limit.to_string();

    server::serve(addr, state).await
}

async fn run_show(config: &AppConfig, username: &str, limit: usize, json: bool) -> Result<()> {
    let client = FeedClient::new(&config.activity.proxy_url)?;
    let events = client
        .fetch(username, limit)
        .await
        .with_context(|| format!("Failed to load activity for {}", username))?;
    let items = normalize(&events, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No recent GitHub activity found for {}.", username);
        return Ok(());
    }

    for item in &items {
        let card = card_for(item);
        println!(
            "{} {}  ({})",
            card.icon.glyph(),
            card.title,
            relative_time_str(&card.created_at)
        );
        println!("  {}", card.description);
        println!("  {}", card.link);
        println!();
    }
    Ok(())
}

async fn run_blog(config: &AppConfig, command: BlogCommand) -> Result<()> {
    let client = BlogClient::new(&config.blog)?;

    match command {
        BlogCommand::List => {
            let posts = client.list_posts().await?;
            if posts.is_empty() {
                println!("No blog posts yet.");
            }
            for post in posts {
                match &post.current_slug {
                    Some(slug) => println!("{}  [{}]", post.title, slug),
                    None => println!("{}  [unpublished]", post.title),
                }
                if let Some(desc) = post.small_description.filter(|d| !d.is_empty()) {
                    println!("  {}", desc);
                }
                println!();
            }
        }
        BlogCommand::Show { slug } => match client.post(&slug).await? {
            Some(post) => {
                println!("{}\n", post.title);
                println!("{}", post.plain_text());
            }
            None => anyhow::bail!("No blog post with slug '{}'", slug),
        },
    }
    Ok(())
}

fn setup_stderr_logging(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_file_logging(
    config: &AppConfig,
    debug: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if !debug {
        return Ok(None);
    }

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "ghfeed.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter("ghfeed=debug")
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
