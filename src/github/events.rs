use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::models::{RateLimit, UpstreamReply};

/// Source of a user's public event feed. An `Err` means the upstream could
/// not be reached at all; HTTP failures come back as an `UpstreamReply`.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn user_events(&self, username: &str, limit: u32) -> Result<UpstreamReply>;
}

#[derive(Clone)]
pub struct GithubEventsClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GithubEventsClient {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self> {
        if !api_url.starts_with("https://") && !is_loopback_http(api_url) {
            bail!("GitHub API URL must use HTTPS: {}", api_url);
        }

        let client = Client::builder()
            .user_agent("ghfeed")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn events_url(&self, username: &str) -> String {
        format!("{}/users/{}/events", self.api_url, username)
    }
}

/// Plain HTTP is only accepted for a local stand-in of the API.
fn is_loopback_http(api_url: &str) -> bool {
    let Some(rest) = api_url.strip_prefix("http://") else {
        return false;
    };
    let host_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let authority = &rest[..host_end];
    let host = match authority.strip_prefix('[') {
        Some(v6) => v6.split(']').next().unwrap_or_default(),
        None => authority.split(':').next().unwrap_or_default(),
    };
    host == "localhost"
        || host
            .parse::<std::net::IpAddr>()
            .is_ok_and(|ip| ip.is_loopback())
}

#[async_trait]
impl EventSource for GithubEventsClient {
    async fn user_events(&self, username: &str, limit: u32) -> Result<UpstreamReply> {
        // Cache buster so nothing between us and GitHub can answer for it.
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        let per_page = limit.to_string();

        let mut req = self
            .client
            .get(self.events_url(username))
            .query(&[
                ("per_page", per_page.as_str()),
                ("sort", "created"),
                ("direction", "desc"),
                ("_", timestamp.as_str()),
            ])
            .header("Accept", "application/vnd.github+json")
            .header("Cache-Control", "no-cache, no-store, must-revalidate")
            .header("Pragma", "no-cache")
            .header("Expires", "0");

        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.context("GitHub API request failed")?;

        let status = resp.status();
        let rate_limit = RateLimit::from_headers(resp.headers());
        info!(
            limit = ?rate_limit.limit,
            remaining = ?rate_limit.remaining,
            reset = ?rate_limit.reset_at,
            "GitHub API rate limits"
        );

        let body = resp
            .text()
            .await
            .context("Failed to read GitHub response")?;

        debug!(username = username, status = %status, "Fetched user events");
        Ok(UpstreamReply {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            rate_limit,
            body,
        })
    }
}
