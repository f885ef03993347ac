use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{BlogPost, BlogSummary, QueryResponse};
use crate::util::config::BlogConfig;

pub const LIST_POSTS_QUERY: &str = r#"
*[_type == 'blog'] | order(_createdAt desc) {
  title,
  smallDescription,
  "currentSlug": slug.current,
  titleImage
}"#;

pub const POST_BY_SLUG_QUERY: &str = r#"
*[_type == "blog" && slug.current == $slug] {
  "currentSlug": slug.current,
  title,
  content,
  titleImage
}[0]"#;

/// Read-only client for the blog's content store query API.
#[derive(Clone)]
pub struct BlogClient {
    client: Client,
    query_url: String,
}

impl BlogClient {
    pub fn new(config: &BlogConfig) -> Result<Self> {
        if config.project_id.is_empty() {
            bail!("No blog project configured. Set [blog] project_id in the config file.");
        }

        let client = Client::builder()
            .user_agent("ghfeed")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            query_url: query_url(config),
        })
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, params: &[(&str, String)]) -> Result<T> {
        let mut pairs: Vec<(String, String)> = vec![("query".to_string(), query.to_string())];
        for (name, value) in params {
            // Query parameters are passed as JSON literals
            pairs.push((format!("${}", name), serde_json::to_string(value)?));
        }

        let resp = self
            .client
            .get(&self.query_url)
            .query(&pairs)
            .send()
            .await
            .context("Content store request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            bail!("Content store returned {}: {}", status, text);
        }

        let data: QueryResponse<T> = resp
            .json()
            .await
            .context("Failed to parse content store response")?;
        Ok(data.result)
    }

    pub async fn list_posts(&self) -> Result<Vec<BlogSummary>> {
        let posts: Vec<BlogSummary> = self.query(LIST_POSTS_QUERY, &[]).await?;
        debug!(count = posts.len(), "Fetched blog posts");
        Ok(posts)
    }

    pub async fn post(&self, slug: &str) -> Result<Option<BlogPost>> {
        let post: Option<BlogPost> = self
            .query(POST_BY_SLUG_QUERY, &[("slug", slug.to_string())])
            .await?;
        debug!(slug = slug, found = post.is_some(), "Fetched blog post");
        Ok(post)
    }
}

pub fn query_url(config: &BlogConfig) -> String {
    format!(
        "https://{}.api.sanity.io/v{}/data/query/{}",
        config.project_id, config.api_version, config.dataset
    )
}
