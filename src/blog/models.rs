use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Post as shown in the blog index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSummary {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub small_description: Option<String>,
    #[serde(default)]
    pub current_slug: Option<String>,
    #[serde(default)]
    pub title_image: Option<Value>,
}

/// Full post, with portable-text content left as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default)]
    pub current_slug: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub title_image: Option<Value>,
}

impl BlogPost {
    pub fn plain_text(&self) -> String {
        plain_text(&self.content)
    }
}

/// Envelope returned by the query endpoint.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    pub result: T,
}

/// Flatten portable-text blocks into paragraphs separated by blank lines.
/// List items get a bullet; non-text blocks (images, embeds) are skipped.
pub fn plain_text(content: &Value) -> String {
    let Some(blocks) = content.as_array() else {
        return String::new();
    };

    let paragraphs: Vec<String> = blocks
        .iter()
        .filter(|block| block["_type"].as_str() == Some("block"))
        .map(|block| {
            let text: String = block["children"]
                .as_array()
                .map(|children| {
                    children
                        .iter()
                        .filter_map(|span| span["text"].as_str())
                        .collect()
                })
                .unwrap_or_default();
            if block.get("listItem").is_some_and(|v| !v.is_null()) {
                format!("• {}", text)
            } else {
                text
            }
        })
        .filter(|p| !p.trim().is_empty())
        .collect();

    paragraphs.join("\n\n")
}
