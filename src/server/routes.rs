use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::{error, instrument, warn};

use crate::github::{EventSource, UpstreamReply};
use crate::server::error::{ProxyError, ProxyResult, no_cache_headers};

pub const DEFAULT_USERNAME: &str = "octocat";
pub const DEFAULT_LIMIT: &str = "5";
const MAX_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct ProxyState {
    pub source: Arc<dyn EventSource>,
    pub default_username: String,
    pub default_limit: String,
}

impl ProxyState {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self {
            source,
            default_username: DEFAULT_USERNAME.to_string(),
            default_limit: DEFAULT_LIMIT.to_string(),
        }
    }
}

pub fn build_router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/github", get(github_activity))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Query pairs as sent. A repeated parameter keeps its first value.
#[derive(Debug, Default)]
pub struct ActivityQuery {
    username: Option<String>,
    limit: Option<String>,
}

impl ActivityQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "username" if query.username.is_none() => query.username = Some(value),
                "limit" if query.limit.is_none() => query.limit = Some(value),
                _ => {}
            }
        }
        query
    }
}

#[instrument(skip(state))]
async fn github_activity(
    State(state): State<Arc<ProxyState>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ProxyResult<impl IntoResponse> {
    let Query(pairs) =
        pairs.map_err(|e| ProxyError::invalid_request(format!("Invalid query string: {}", e)))?;
    let query = ActivityQuery::from_pairs(pairs);

    let username = query
        .username
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| state.default_username.clone());
    let limit = query
        .limit
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| state.default_limit.clone());

    validate_username(&username)?;
    let limit = parse_limit(&limit)?;

    let reply = match state.source.user_events(&username, limit).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(username = %username, error = %e, "Error proxying GitHub request");
            return Err(ProxyError::Transport);
        }
    };

    let data = map_reply(&username, reply)?;
    Ok((no_cache_headers(), Json(data)))
}

/// Map an upstream reply onto the proxy's response taxonomy.
pub fn map_reply(username: &str, reply: UpstreamReply) -> ProxyResult<Value> {
    if !reply.is_success() {
        if reply.status == 403 && reply.rate_limit.is_exhausted() {
            warn!(reset = ?reply.rate_limit.reset_at, "GitHub rate limit exhausted");
            return Err(ProxyError::RateLimitExceeded);
        }
        if reply.status == 404 {
            return Err(ProxyError::UserNotFound(username.to_string()));
        }
        return Err(ProxyError::Upstream {
            status: reply.status,
            status_text: reply.status_text,
        });
    }

    serde_json::from_str(&reply.body).map_err(|e| {
        error!(error = %e, "GitHub returned a body that is not JSON");
        ProxyError::Transport
    })
}

fn validate_username(username: &str) -> ProxyResult<()> {
    let valid = username.len() <= 39
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ProxyError::invalid_request(format!(
            "Invalid GitHub username '{}'",
            username
        )))
    }
}

fn parse_limit(limit: &str) -> ProxyResult<u32> {
    match limit.trim().parse::<u32>() {
        Ok(n) if (1..=MAX_LIMIT).contains(&n) => Ok(n),
        _ => Err(ProxyError::invalid_request(format!(
            "Invalid limit '{}': expected a number between 1 and {}",
            limit, MAX_LIMIT
        ))),
    }
}
