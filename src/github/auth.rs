use tracing::debug;

/// Look up an optional GitHub token for upstream calls:
/// 1. `GITHUB_TOKEN` environment variable
/// 2. `GH_TOKEN` environment variable
///
/// Without one, calls go out unauthenticated and get the lower rate limit.
pub fn resolve_token() -> Option<String> {
    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = std::env::var(var) {
            let token = token.trim().to_string();
            if !token.is_empty() {
                debug!(source = var, "Token resolved from environment");
                return Some(token);
            }
        }
    }

    debug!("No GitHub token configured, using unauthenticated requests");
    None
}
