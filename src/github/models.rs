use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: Option<u32>,
    pub limit: Option<u32>,
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let number = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<i64>().ok())
        };

        RateLimit {
            remaining: number("x-ratelimit-remaining").and_then(|n| u32::try_from(n).ok()),
            limit: number("x-ratelimit-limit").and_then(|n| u32::try_from(n).ok()),
            reset_at: number("x-ratelimit-reset").and_then(|s| DateTime::from_timestamp(s, 0)),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

/// What the events API sent back, before any interpretation.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub status_text: String,
    pub rate_limit: RateLimit,
    pub body: String,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
