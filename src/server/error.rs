use axum::Json;
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("GitHub API rate limit exceeded")]
    RateLimitExceeded,
    #[error("GitHub user '{0}' not found")]
    UserNotFound(String),
    #[error("GitHub API error: {status_text}")]
    Upstream { status: u16, status_text: String },
    #[error("Failed to fetch GitHub data")]
    Transport,
    #[error("{0}")]
    InvalidRequest(String),
}

impl ProxyError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::RateLimitExceeded => StatusCode::FORBIDDEN,
            ProxyError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Transport => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Headers that keep browsers and intermediaries from caching proxy output.
pub fn no_cache_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ),
        (header::PRAGMA, HeaderValue::from_static("no-cache")),
        (header::EXPIRES, HeaderValue::from_static("0")),
    ]
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, no_cache_headers(), body).into_response()
    }
}

pub type ProxyResult<T> = Result<T, ProxyError>;
