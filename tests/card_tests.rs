use ghfeed::activity::card::repo_short_name;
use ghfeed::activity::models::{
    ActivityDetail, ActivityItem, Commit, PullRequestAction, PullRequestInfo, RepoRef,
};
use ghfeed::activity::{CardIcon, card_for, normalize, parse_events};

fn make_push(commits: u32, head: Option<&str>) -> ActivityItem {
    ActivityItem {
        id: "1".into(),
        repo: RepoRef::from_slug("owner/repo"),
        created_at: "2024-01-01T00:00:00Z".into(),
        detail: ActivityDetail::Push {
            branch: "main".into(),
            head: head.map(String::from),
            commits: (0..commits)
                .map(|i| Commit {
                    sha: format!("sha{}", i),
                    message: "msg".into(),
                })
                .collect(),
            commit_count: commits,
        },
    }
}

fn make_pr(action: &str, merged: bool, html_url: Option<&str>, title: Option<&str>) -> ActivityItem {
    ActivityItem {
        id: "2".into(),
        repo: RepoRef::from_slug("owner/repo"),
        created_at: "2024-01-01T00:00:00Z".into(),
        detail: ActivityDetail::PullRequest {
            action: PullRequestAction::parse(action),
            number: Some(42),
            pull_request: Some(PullRequestInfo {
                html_url: html_url.map(String::from),
                title: title.map(String::from),
                merged,
                number: Some(42),
            }),
        },
    }
}

#[test]
fn test_push_scenario_from_raw_feed() {
    let body = r#"[{"type":"PushEvent","repo":{"name":"a/b"},"payload":{"ref":"refs/heads/main","commits":[{"sha":"x","message":"m"}],"head":"x"},"created_at":"2024-01-01T00:00:00Z","id":"1"}]"#;
    let items = normalize(&parse_events(body).unwrap(), 5);
    assert_eq!(items.len(), 1);

    let card = card_for(&items[0]);
    assert_eq!(card.icon, CardIcon::Commit);
    assert_eq!(card.title, "Pushed to b");
    assert_eq!(card.description, "1 commit to main");
    assert_eq!(card.link, "https://github.com/a/b/commits/x");
}

#[test]
fn test_push_pluralizes_commits() {
    assert_eq!(card_for(&make_push(0, Some("h"))).description, "0 commits to main");
    assert_eq!(card_for(&make_push(3, Some("h"))).description, "3 commits to main");
}

#[test]
fn test_push_without_head_links_to_repo() {
    let card = card_for(&make_push(1, None));
    assert_eq!(card.link, "https://github.com/owner/repo");
}

#[test]
fn test_opened_pr() {
    let card = card_for(&make_pr(
        "opened",
        false,
        Some("https://github.com/owner/repo/pull/42"),
        Some("Add feature"),
    ));
    assert_eq!(card.icon, CardIcon::PullRequestOpened);
    assert_eq!(card.title, "Opened PR #42 in repo");
    assert_eq!(card.description, "Add feature");
    assert_eq!(card.link, "https://github.com/owner/repo/pull/42");
}

#[test]
fn test_merged_pr() {
    let card = card_for(&make_pr("closed", true, None, Some("Ship it")));
    assert_eq!(card.icon, CardIcon::PullRequestMerged);
    assert_eq!(card.title, "Merged PR #42 in repo");
}

#[test]
fn test_closed_unmerged_pr() {
    let card = card_for(&make_pr("closed", false, None, Some("Nope")));
    assert_eq!(card.icon, CardIcon::PullRequestClosed);
    assert_eq!(card.title, "Closed PR #42 in repo");
}

#[test]
fn test_other_action_is_update() {
    let card = card_for(&make_pr("synchronize", false, None, Some("WIP")));
    assert_eq!(card.icon, CardIcon::PullRequestUpdated);
    assert_eq!(card.title, "Updated PR #42 in repo");
}

#[test]
fn test_pr_link_falls_back_to_repo_url() {
    let card = card_for(&make_pr("opened", false, None, Some("t")));
    assert_eq!(card.link, "https://github.com/owner/repo");
}

#[test]
fn test_pr_without_title_uses_placeholder() {
    let card = card_for(&make_pr("opened", false, None, None));
    assert_eq!(card.description, "Pull request");
}

#[test]
fn test_card_is_pure() {
    let item = make_pr("opened", false, None, Some("t"));
    assert_eq!(card_for(&item), card_for(&item));
}

#[test]
fn test_repo_short_name() {
    assert_eq!(repo_short_name("owner/repo"), "repo");
    assert_eq!(repo_short_name("noslash"), "noslash");
}
