use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::models::RawEvent;
use super::normalize::{ParseError, parse_events};

pub const GENERIC_FAILURE: &str = "Could not load GitHub activity";

/// Failure while asking the proxy for activity. `Display` is what the view
/// shows to the user.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{0}")]
    Transport(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error(transparent)]
    Malformed(#[from] ParseError),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the activity proxy endpoint.
#[derive(Clone)]
pub struct FeedClient {
    client: Client,
    proxy_url: String,
}

impl FeedClient {
    pub fn new(proxy_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("ghfeed")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            proxy_url: proxy_url.to_string(),
        })
    }

    pub async fn fetch(&self, username: &str, limit: usize) -> Result<Vec<RawEvent>, FeedError> {
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        let limit = limit.to_string();

        let resp = self
            .client
            .get(&self.proxy_url)
            .query(&[
                ("username", username),
                ("limit", limit.as_str()),
                ("_", timestamp.as_str()),
            ])
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        debug!(status = %status, bytes = body.len(), "Proxy responded");
        interpret_response(status, &body)
    }
}

/// Turn a proxy status and body into events or a displayable failure.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<Vec<RawEvent>, FeedError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        return Err(FeedError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(parse_events(body)?)
}
