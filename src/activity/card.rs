use serde::Serialize;

use super::models::{ActivityDetail, ActivityItem, PullRequestAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardIcon {
    Commit,
    PullRequestOpened,
    PullRequestMerged,
    PullRequestClosed,
    PullRequestUpdated,
}

impl CardIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            CardIcon::Commit => "●",
            CardIcon::PullRequestOpened => "⇡",
            CardIcon::PullRequestMerged => "⇄",
            CardIcon::PullRequestClosed => "✕",
            CardIcon::PullRequestUpdated => "↻",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityCard {
    pub icon: CardIcon,
    pub title: String,
    pub description: String,
    pub link: String,
    pub repo_name: String,
    pub repo_url: String,
    pub created_at: String,
}

/// The part of an `owner/name` slug after the first slash.
pub fn repo_short_name(slug: &str) -> &str {
    slug.split_once('/').map(|(_, name)| name).unwrap_or(slug)
}

fn pluralize_commits(count: u32) -> &'static str {
    if count == 1 { "commit" } else { "commits" }
}

pub fn card_for(item: &ActivityItem) -> ActivityCard {
    let short = repo_short_name(&item.repo.name);

    let (icon, title, description, link) = match &item.detail {
        ActivityDetail::Push {
            branch,
            head,
            commit_count,
            ..
        } => {
            let link = match head {
                Some(head) => format!("{}/commits/{}", item.repo.url, head),
                None => item.repo.url.clone(),
            };
            (
                CardIcon::Commit,
                format!("Pushed to {}", short),
                format!(
                    "{} {} to {}",
                    commit_count,
                    pluralize_commits(*commit_count),
                    branch
                ),
                link,
            )
        }
        ActivityDetail::PullRequest {
            action,
            number,
            pull_request,
        } => {
            let merged = pull_request.as_ref().is_some_and(|pr| pr.merged);
            let (icon, verb) = match action {
                PullRequestAction::Opened => (CardIcon::PullRequestOpened, "Opened"),
                PullRequestAction::Closed if merged => (CardIcon::PullRequestMerged, "Merged"),
                PullRequestAction::Closed => (CardIcon::PullRequestClosed, "Closed"),
                PullRequestAction::Other(_) => (CardIcon::PullRequestUpdated, "Updated"),
            };
            let number = number.map(|n| n.to_string()).unwrap_or_default();
            let description = pull_request
                .as_ref()
                .and_then(|pr| pr.title.clone())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Pull request".to_string());
            let link = pull_request
                .as_ref()
                .and_then(|pr| pr.html_url.clone())
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| item.repo.url.clone());
            (
                icon,
                format!("{} PR #{} in {}", verb, number, short),
                description,
                link,
            )
        }
    };

    ActivityCard {
        icon,
        title,
        description,
        link,
        repo_name: item.repo.name.clone(),
        repo_url: item.repo.url.clone(),
        created_at: item.created_at.clone(),
    }
}
