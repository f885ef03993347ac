use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub const PUSH_EVENT: &str = "PushEvent";
pub const PULL_REQUEST_EVENT: &str = "PullRequestEvent";

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// An event as it arrives from the GitHub user events feed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: RawRepo,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub head: Option<String>,
    #[serde(default)]
    pub commits: Option<Vec<Commit>>,
    #[serde(default)]
    pub size: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub pull_request: Option<PullRequestInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestInfo {
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub number: Option<u64>,
}

/// Typed view of a raw event payload. Anything that is not a push or a
/// pull request lands in `Ignored`.
#[derive(Debug, Clone)]
pub enum RawPayload {
    Push(PushPayload),
    PullRequest(PullRequestPayload),
    Ignored,
}

impl RawEvent {
    pub fn typed_payload(&self) -> RawPayload {
        match self.kind.as_str() {
            PUSH_EVENT => match serde_json::from_value(self.payload.clone()) {
                Ok(p) => RawPayload::Push(p),
                Err(e) => {
                    warn!(id = %self.id, error = %e, "Dropping push event with unreadable payload");
                    RawPayload::Ignored
                }
            },
            PULL_REQUEST_EVENT => match serde_json::from_value(self.payload.clone()) {
                Ok(p) => RawPayload::PullRequest(p),
                Err(e) => {
                    warn!(id = %self.id, error = %e, "Dropping pull request event with unreadable payload");
                    RawPayload::Ignored
                }
            },
            _ => RawPayload::Ignored,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub name: String,
    pub url: String,
}

impl RepoRef {
    pub fn from_slug(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: format!("https://github.com/{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestAction {
    Opened,
    Closed,
    Other(String),
}

impl PullRequestAction {
    pub fn parse(action: &str) -> Self {
        match action {
            "opened" => Self::Opened,
            "closed" => Self::Closed,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActivityDetail {
    #[serde(rename = "PushEvent")]
    Push {
        branch: String,
        head: Option<String>,
        commits: Vec<Commit>,
        commit_count: u32,
    },
    #[serde(rename = "PullRequestEvent")]
    PullRequest {
        action: PullRequestAction,
        number: Option<u64>,
        pull_request: Option<PullRequestInfo>,
    },
}

/// Display-ready activity entry. Only pushes and pull requests survive
/// normalization, so `detail` has exactly those two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    pub repo: RepoRef,
    pub created_at: String,
    #[serde(flatten)]
    pub detail: ActivityDetail,
}

impl ActivityItem {
    pub fn kind(&self) -> &'static str {
        match self.detail {
            ActivityDetail::Push { .. } => PUSH_EVENT,
            ActivityDetail::PullRequest { .. } => PULL_REQUEST_EVENT,
        }
    }

    pub fn from_raw(event: &RawEvent) -> Option<Self> {
        let detail = match event.typed_payload() {
            RawPayload::Push(p) => {
                let branch = p
                    .git_ref
                    .as_deref()
                    .map(|r| r.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(r).to_string())
                    .unwrap_or_default();
                let commit_count = match &p.commits {
                    Some(commits) => u32::try_from(commits.len()).unwrap_or(u32::MAX),
                    None => p.size.unwrap_or(0),
                };
                ActivityDetail::Push {
                    branch,
                    head: p.head,
                    commits: p.commits.unwrap_or_default(),
                    commit_count,
                }
            }
            RawPayload::PullRequest(p) => ActivityDetail::PullRequest {
                action: PullRequestAction::parse(p.action.as_deref().unwrap_or_default()),
                number: p
                    .number
                    .or_else(|| p.pull_request.as_ref().and_then(|pr| pr.number)),
                pull_request: p.pull_request,
            },
            RawPayload::Ignored => return None,
        };

        Some(Self {
            id: event.id.clone(),
            repo: RepoRef::from_slug(&event.repo.name),
            created_at: event.created_at.clone(),
            detail,
        })
    }
}
