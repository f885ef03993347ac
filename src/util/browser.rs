use anyhow::{Context, Result, bail};
use tracing::debug;

/// Open a feed link in the user's default browser. Links come from upstream
/// data, so anything that is not http(s) is refused.
pub fn open_link(url: &str) -> Result<()> {
    if !is_web_link(url) {
        bail!("Refusing to open non-web link: {}", url);
    }
    debug!(url = url, "Opening link in browser");
    open::that(url).with_context(|| format!("Failed to open {}", url))?;
    Ok(())
}

pub fn is_web_link(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}
